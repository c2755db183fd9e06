//! NES controller input handling.
//!
//! Controllers use a strobe-driven parallel-to-serial shift register:
//!
//! 1. **Strobe** ($4016 write, bit 0): while high the latch
//!    continuously reloads from the live button states; the falling
//!    edge freezes them for serial read-out. A $4016 write strobes
//!    both ports.
//! 2. **Serial read** ($4016/$4017 read, bit 0): one button per read
//!    in the order A, B, Select, Start, Up, Down, Left, Right; reads
//!    past the eighth return 1.
//!
//! The [`Controller`] trait is the seam between the bus and whatever
//! produces input. [`StandardController`] is the headless variant the
//! console ships with: the host pushes button states into it. A
//! keyboard or gamepad front end implements [`Controller`] itself and
//! polls its device in [`Controller::update`].

mod controller;

pub use controller::{Button, Controller, PortState, StandardController};
