pub mod availability;
pub mod booking;
pub mod slot_picker;
pub mod store;

// Include slot picker tests
#[cfg(test)]
#[path = "slot_picker_test.rs"]
mod slot_picker_tests;

// Include availability editor tests
#[cfg(test)]
#[path = "availability_test.rs"]
mod availability_tests;

// Include booking tests
#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_tests;

// Include store tests
#[cfg(test)]
#[path = "store_test.rs"]
mod store_tests;
