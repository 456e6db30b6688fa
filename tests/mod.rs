//! Test suite for StudyReel
//!
//! This module organizes all tests
