mod batch_test;
mod dispatch_test;
mod request_controls_test;
mod wire_test;
