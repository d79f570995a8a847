// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: fluent broadcast arithmetic and sticky error inspection.
//!
//! ```bash
//! cargo run -p tensor-engine --example broadcast_demo
//! ```

use tensor_engine::Tensor;

fn main() {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    // A 3x4 grid of running values, scaled and shifted per column.
    let t = Tensor::arange(&[12.0])
        .reshape(&[3, 4])
        .multiply(&Tensor::fill(0.5, &[4]))
        .add(&Tensor::arange(&[4.0]));
    println!("scaled grid:\n{t}\n");

    // Division by zero poisons the tensor but never panics; every later
    // call passes the errored handle through.
    let poisoned = Tensor::fill(1.0, &[2, 2])
        .divide(&Tensor::fill(0.0, &[2, 2]))
        .multiply_scalar(10.0);
    println!("poisoned:\n{poisoned}");
    println!("error: {:?}\n", poisoned.error());

    // Arithmetic on an absent tensor yields an inspectable error value,
    // not a crash.
    let ghost = Tensor::absent().add(&t);
    println!("absent receiver error: {:?}", ghost.error());
}
