//! HTTP middleware.

pub mod allowed_hosts;

pub use allowed_hosts::allowed_hosts_middleware;
