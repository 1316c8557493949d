use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use karat_app::{
    camera::{FileCamera, Lens},
    config::AppConfig,
};

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct PhotoCommand {
    #[command(subcommand)]
    command: PhotoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PhotoSubcommand {
    /// Store a still and register a four digit code for it
    Capture(CaptureArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CaptureArgs {
    #[command(flatten)]
    config: AppConfig,

    /// JPEG still produced by the camera
    #[arg(long)]
    still: PathBuf,

    /// Camera the still was taken with
    #[arg(long, value_enum, default_value_t)]
    lens: Lens,
}

pub(crate) async fn run(command: PhotoCommand) -> Result<(), String> {
    match command.command {
        PhotoSubcommand::Capture(args) => {
            let ctx = context(&args.config)?;
            let flow = ctx.capture_flow(Arc::new(FileCamera::new(args.still)));

            let capture = flow
                .capture_and_register(args.lens)
                .await
                .map_err(|error| format!("failed to capture photo: {error}"))?;

            println!("code: {}", capture.code);
            println!("image: {}", capture.image_name);

            Ok(())
        }
    }
}
