use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use reunify::{cli, config, error, generator, loader, output};
use reunify_common::{ImageRole, RequestOutcome, Workflow, MISSING_INPUT_MESSAGE};
use cli::{Cli, Commands};
use config::Config;
use error::{ReunifyError, Result};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { child, adult, prompt, output: output_path, model, timeout } => {
            println!("📸 reunify - then and now\n");

            // 1. 画像読み込み（読めないファイルは未選択扱い）
            println!("[1/3] 写真を読み込み中...");
            let mut workflow = Workflow::with_prompt(prompt);
            for (role, path) in [(ImageRole::Child, &child), (ImageRole::Adult, &adult)] {
                let image = loader::load_image(path);
                if let Some(image) = &image {
                    println!("✔ {}: {} ({})", role, path.display(), image.mime_type);
                }
                workflow.set_image(role, image);
            }

            if !workflow.can_submit() {
                return Err(ReunifyError::Common(reunify_common::Error::Validation(
                    MISSING_INPUT_MESSAGE.to_string(),
                )));
            }

            // 2. 生成
            let client = generator::GeminiClient::from_config(&config, model.as_deref(), timeout)?;
            println!("\n[2/3] 画像を生成中...");
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Reunifying...");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let outcome = workflow.submit_with(&client).await?.clone();
            spinner.finish_and_clear();

            // 3. 保存
            match outcome {
                RequestOutcome::Succeeded(url) => {
                    println!("✔ 生成完了\n");
                    println!("[3/3] 結果を保存中...");
                    let path = output::save_data_url(&url, output_path.as_deref())?;
                    println!("✔ 結果を保存: {}", path.display());
                    println!("\n✅ 完了");
                }
                RequestOutcome::Failed(message) => {
                    return Err(ReunifyError::ApiCall(message));
                }
                other => {
                    return Err(ReunifyError::ApiCall(format!(
                        "unexpected state: {}",
                        other.as_str()
                    )));
                }
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.model);
                println!("  APIエンドポイント: {}", config.api_base_url);
                let timeout = match config.timeout() {
                    Some(t) => format!("{}秒", t.as_secs()),
                    None => "なし".to_string(),
                };
                let key_state = if config.get_api_key().is_ok() { "設定済み" } else { "未設定" };
                println!("  タイムアウト: {}", timeout);
                println!("  APIキー: {}", key_state);
            }
        }
    }

    Ok(())
}
