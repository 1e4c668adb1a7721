//! Advent of Code 2024.

mod day01;
mod day03;
