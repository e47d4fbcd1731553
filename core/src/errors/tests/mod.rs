mod auth_failure_tests;
