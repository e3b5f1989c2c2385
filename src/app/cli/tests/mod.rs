//! Tests for argument parsing, configuration loading and settings resolution
