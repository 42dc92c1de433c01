mod helpers;

mod profile_test;
mod subscription_test;
