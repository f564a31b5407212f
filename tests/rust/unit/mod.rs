//! Unit tests - Tests for individual components without external dependencies
