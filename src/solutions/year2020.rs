//! Advent of Code 2020.

mod day01;
