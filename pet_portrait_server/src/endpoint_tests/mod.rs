mod admin;
mod discounts;
mod helpers;
mod mocks;
mod orders;
mod webhooks;
