use std::env;

use anyhow::{bail, Context};
use keanu::config;
use keanu::linalg::Matrix;
use keanu::timer::Timer;

const DEFAULT_SIZE: usize = 64;

fn main() -> anyhow::Result<()> {
    keanu::init_logger!();

    let mut args = env::args().skip(1);
    let size = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid matrix size '{arg}'"))?,
        None => DEFAULT_SIZE,
    };
    if args.next().is_some() {
        bail!("usage: keanu [SIZE]");
    }
    if size == 0 {
        bail!("matrix size must be greater than 0");
    }

    let order = config::preferred_order();
    log::info!("multiplying {size}x{size} {order} matrices");

    let generate = Timer::new("generate");
    let multiply = Timer::new("multiply");
    let check = Timer::new("identity");

    let mut rng = fastrand::Rng::new();
    let mut random = || {
        generate.time(|| Matrix::from_fn(size, size, order, |_, _| rng.i64(-100..=100)))
    };
    let a = random();
    let b = random();

    let product = multiply.time(|| &a * &b);
    log::debug!(
        "trace of product: {}",
        (0..size).map(|i| product[(i, i)]).sum::<i64>()
    );

    let identity = Matrix::identity(size).into_order(order);
    if !check.time(|| &a * &identity == a) {
        bail!("A * I != A for a {size}x{size} {order} matrix");
    }

    println!("{generate}, {multiply}, {check}");
    Ok(())
}
