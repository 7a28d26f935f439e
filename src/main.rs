use log::error;
use mandelbrot_viewer::{config::Config, viewer};

fn main() {
    env_logger::init();

    if let Err(error) = viewer::run(&Config::default()) {
        error!("{}", error);
    }
}
