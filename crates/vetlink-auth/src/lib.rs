//! # vetlink-auth
//!
//! Authentication primitives for VetLink: JWT access/refresh token
//! issuance and validation, and Argon2id password hashing.

pub mod jwt;
pub mod password;
