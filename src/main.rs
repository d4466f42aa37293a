use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vips_dl::{
    commands::{self, SelectionRequest},
    platform::{ClientHints, PlatformSource},
    selection::{Architecture, Linking, Variant},
};

/// vips-dl - libvips Windows binary selector
///
/// Works out which prebuilt libvips archive fits a machine and prints (or
/// downloads) it. The architecture is detected from the host, a user-agent
/// string or client hints unless given explicitly. Without --version the
/// latest GitHub release is used.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
///
/// Examples:
///   vips-dl link                          # Latest build for this machine
///   vips-dl link --arch arm64 --linking static-ffi
///   vips-dl options --variant all         # Show which options remain available
///   vips-dl download --version 8.15.0 -o C:\Downloads
#[derive(Parser, Debug)]
#[command(author, version = env!("VIPS_DL_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "VIPS_DL_API_URL",
        value_name = "URL",
        global = true
    )]
    api_url: Option<String>,

    /// Release-asset URL prefix; the version and filename are appended
    #[arg(
        long = "download-prefix",
        env = "VIPS_DL_DOWNLOAD_PREFIX",
        value_name = "URL",
        global = true
    )]
    download_prefix: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the archive filename and download URL
    Link(LinkArgs),

    /// Print the active and disabled options for a selection
    Options(OptionsArgs),

    /// Download the selected archive
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
struct SelectionArgs {
    /// CPU architecture: w32, w64 or arm64
    #[arg(long = "arch", value_name = "ARCH")]
    architecture: Option<Architecture>,

    /// Build variant: web or all
    #[arg(long)]
    variant: Option<Variant>,

    /// Linking mode: shared, static or static-ffi
    #[arg(long)]
    linking: Option<Linking>,

    /// libvips version (defaults to the latest release)
    #[arg(long = "version", value_name = "VERSION")]
    release_version: Option<String>,

    /// Detect the architecture from a user-agent string
    #[arg(long, value_name = "UA", conflicts_with_all = ["hint_arch", "hint_bitness"])]
    user_agent: Option<String>,

    /// Client hint `architecture` (e.g. x86, arm)
    #[arg(long, value_name = "ARCH")]
    hint_arch: Option<String>,

    /// Client hint `bitness` (e.g. 32, 64)
    #[arg(long, value_name = "BITS")]
    hint_bitness: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl SelectionArgs {
    fn platform(&self) -> PlatformSource {
        if let Some(ua) = &self.user_agent {
            return PlatformSource::UserAgent(ua.clone());
        }
        if self.hint_arch.is_some() || self.hint_bitness.is_some() {
            return PlatformSource::ClientHints(ClientHints {
                architecture: self.hint_arch.clone(),
                bitness: self.hint_bitness.clone(),
            });
        }
        PlatformSource::Host
    }

    fn request(&self) -> SelectionRequest {
        SelectionRequest {
            architecture: self.architecture,
            variant: self.variant,
            linking: self.linking,
            version: self.release_version.clone(),
            platform: self.platform(),
        }
    }
}

#[derive(clap::Args, Debug)]
struct LinkArgs {
    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(clap::Args, Debug)]
struct OptionsArgs {
    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(clap::Args, Debug)]
struct DownloadArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Output file or directory (defaults to the archive name in the current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = vips_dl::runtime::RealRuntime;

    match cli.command {
        Commands::Link(args) => {
            let s = &args.selection;
            commands::link(
                runtime,
                &s.request(),
                cli.api_url,
                cli.download_prefix,
                s.json,
            )
            .await?
        }
        Commands::Options(args) => {
            let s = &args.selection;
            commands::options(runtime, &s.request(), cli.api_url, s.json).await?
        }
        Commands::Download(args) => {
            commands::download(
                runtime,
                &args.selection.request(),
                args.output,
                cli.api_url,
                cli.download_prefix,
            )
            .await?
        }
    }
    Ok(())
}
