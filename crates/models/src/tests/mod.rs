/// Entity CRUD and constraint checks against a live database
pub mod crud_tests;
