mod api_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: config, translations and reschedule checks wired together
// - api_tests: the HTTP routes driven through the router without a socket
