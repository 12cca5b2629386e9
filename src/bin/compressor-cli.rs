use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "compressor-cli")]
#[command(about = "Command line client for the minification API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Minify a JavaScript file
    Javascript(MinifyArgs),
    /// Minify a CSS file
    Css(MinifyArgs),
    /// Minify an HTML file
    Html(MinifyArgs),
    /// Gzip a file
    Gz {
        /// File to compress
        input: PathBuf,
        /// Where to write the compressed bytes
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Check service status
    Status,
}

#[derive(Args)]
struct MinifyArgs {
    /// File to minify
    input: PathBuf,

    /// Minifier option, repeatable (e.g. -o toplevel=true)
    #[arg(short = 'o', long = "option", value_parser = parse_option)]
    options: Vec<(String, String)>,
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))?;
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Javascript(args) => minify(&client, &cli.url, "javascript", args).await?,
        Commands::Css(args) => minify(&client, &cli.url, "css", args).await?,
        Commands::Html(args) => minify(&client, &cli.url, "html", args).await?,
        Commands::Gz { input, output } => {
            let code = tokio::fs::read_to_string(&input).await?;
            let file_name = input
                .file_name()
                .map(|n| format!("{}.gz", n.to_string_lossy()))
                .unwrap_or_else(|| "output.gz".to_string());

            let res = client
                .post(format!("{}/gz/{}", cli.url, file_name))
                .form(&[("code", code)])
                .send()
                .await?;

            if !res.status().is_success() {
                eprintln!("Error: API returned status {}", res.status());
                return Ok(());
            }

            let bytes = res.bytes().await?;
            tokio::fs::write(&output, &bytes).await?;
            println!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn minify(
    client: &reqwest::Client,
    url: &str,
    endpoint: &str,
    args: MinifyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = tokio::fs::read_to_string(&args.input).await?;

    let mut form = vec![("code".to_string(), code)];
    for (key, value) in args.options {
        form.push((format!("options[{}]", key), value));
    }

    let res = client
        .post(format!("{}/{}/", url, endpoint))
        .form(&form)
        .send()
        .await?;

    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("Response: {}", json);
        return Ok(());
    }

    match json.get("code").and_then(Value::as_str) {
        Some(code) => println!("{}", code),
        None => println!("{}", serde_json::to_string_pretty(&json)?),
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
