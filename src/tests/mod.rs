pub mod integration_tests;
