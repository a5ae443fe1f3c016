mod ai;
mod auth;
mod contact;
mod payments;
