mod helpers;
mod membership_test;
mod toggle_test;
