//! Tests for the notification feed service
