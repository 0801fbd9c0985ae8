//! Snake on a rectangular grid, played by a controller that follows a
//! Hamiltonian circuit and takes shortcuts towards food.

pub mod ai;
pub mod circuit;
pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod game;
pub mod simulation;
pub mod snake;
