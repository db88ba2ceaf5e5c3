//! Token service tests


mod refresh_policy_tests;
