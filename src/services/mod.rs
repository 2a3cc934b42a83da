pub mod controller;
pub mod conversation;
pub mod persistence;
pub mod reconcile;
pub mod transfer;
