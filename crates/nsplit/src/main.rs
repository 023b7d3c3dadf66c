//! `nsplit` binary.
//!
//! Builds the tokio runtime, installs logging and hands the arguments to
//! [`nsplit_cli`].

fn main() {
    nsplit_cli::init_tracing();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            std::process::exit(1);
        }
    };

    let code = runtime.block_on(nsplit_cli::run_cli(std::env::args().collect()));
    drop(runtime);
    std::process::exit(code);
}
