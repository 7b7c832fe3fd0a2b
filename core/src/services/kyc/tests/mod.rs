//! Tests for the KYC verification service

mod mocks;
