//! End-to-end composition tests

mod generics_test;
