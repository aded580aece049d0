pub mod review_pr;
