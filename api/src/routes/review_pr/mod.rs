pub mod evaluate_pr_request;
pub mod evaluate_pr_response;
pub mod evaluate_pr_route;
pub mod fetch_diff_route;
