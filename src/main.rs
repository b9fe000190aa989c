use std::env;

use watchface::{window, Error, FaceConfig, WindowOptions};

fn main() -> Result<(), Error> {
    env_logger::init();

    // --size N, --title T, --notifications N, --ambient, --low-bit
    let mut options = WindowOptions::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                if let Some(size) = args.next().and_then(|s| s.parse().ok()) {
                    options.size = size;
                }
            }
            "--title" => {
                if let Some(title) = args.next() {
                    options.title = title;
                }
            }
            "--notifications" => {
                if let Some(count) = args.next().and_then(|s| s.parse().ok()) {
                    options.notifications = count;
                }
            }
            "--ambient" => options.ambient = true,
            "--low-bit" => options.low_bit_ambient = true,
            other => log::warn!("ignoring unknown argument {other}"),
        }
    }

    println!("a: ambient  l: low-bit  b: burn-in  n/c: add/clear notifications  z: time zone");
    window::run(FaceConfig::default(), options)
}
