use clap::Parser;
use secret_santa::core::Mailer;
use secret_santa::utils::error::ErrorSeverity;
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{
    CliConfig, DeliveryReport, DryRunMailer, JsonParticipantFile, MessageTemplate, SantaError,
    SecretSantaEngine, SmtpConfig, SmtpMailer, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🎅 Starting secret-santa");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let file_config = match config.config.as_deref() {
        Some(path) => {
            match TomlConfig::from_file(path).and_then(|c| c.validate().map(|_| c)) {
                Ok(file_config) => {
                    tracing::info!("✅ Configuration loaded from {}", path);
                    Some(file_config)
                }
                Err(e) => exit_with(&e),
            }
        }
        None => None,
    };

    let template = file_config
        .as_ref()
        .map(TomlConfig::message_template)
        .unwrap_or_default();
    // 命令列參數優先
    let max_attempts = config
        .max_attempts
        .or_else(|| file_config.as_ref().and_then(TomlConfig::max_attempts));

    let source = JsonParticipantFile::new(&config.participants);

    let result = if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no email will be sent");
        draw(source, DryRunMailer::new(), template, max_attempts).await
    } else {
        // SMTP 設定只在實際寄信時才需要
        let smtp = match &file_config {
            Some(file_config) => file_config.smtp_settings().cloned(),
            None => SmtpConfig::from_env().and_then(|smtp| smtp.validate().map(|_| smtp)),
        };
        let mailer = match smtp.and_then(|smtp| SmtpMailer::new(&smtp)) {
            Ok(mailer) => mailer,
            Err(e) => exit_with(&e),
        };
        draw(source, mailer, template, max_attempts).await
    };

    match result {
        Ok(report) if report.is_complete() => {
            println!("✅ All {} participants notified", report.delivered.len());
        }
        Ok(report) => {
            for failure in &report.failed {
                eprintln!(
                    "❌ Could not notify {} <{}>: {}",
                    failure.giver, failure.email, failure.reason
                );
            }
            eprintln!(
                "⚠️ {}/{} participants notified; the draw stands, tell the others by hand",
                report.delivered.len(),
                report.total()
            );
            std::process::exit(2);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

async fn draw<M: Mailer>(
    source: JsonParticipantFile,
    mailer: M,
    template: MessageTemplate,
    max_attempts: Option<usize>,
) -> secret_santa::Result<DeliveryReport> {
    SecretSantaEngine::new(source, mailer)
        .with_template(template)
        .with_max_attempts(max_attempts)
        .run()
        .await
}

fn exit_with(e: &SantaError) -> ! {
    tracing::error!(
        "❌ secret-santa failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
