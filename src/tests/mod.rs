// Test modules for HomeLease Inbox
// Each module contains unit tests for the corresponding source module
