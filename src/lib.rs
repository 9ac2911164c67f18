#![allow(dead_code)]

pub mod loading;
pub mod ui;
