
mod cart_test;
mod http_test;
mod report_test;
mod seller_test;
mod user_test;
