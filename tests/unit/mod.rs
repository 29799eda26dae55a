mod conformance_tests;
mod property_tests;
mod tracker_tests;
