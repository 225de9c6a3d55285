//! Unit tests for the dispatch boundary.
