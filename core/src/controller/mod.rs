// core/src/controller/mod.rs

//! Page controllers. Each one owns its view state and is driven one event at
//! a time through `&mut self`; rendering is left to the caller, which reads
//! in-flight state through a cloned `BusyFlag`.

pub mod busy;
pub mod dashboard;
pub mod form;
