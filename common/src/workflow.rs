//! 生成ワークフロー（CLI/WASM共通）
//!
//! フォーム状態と送信結果を一つの `Workflow` が持つ。
//! 状態遷移: Idle → InFlight → Succeeded | Failed、終端状態からは次の送信で再び InFlight。
//!
//! UIは `begin_submit` と `finish` の間にawaitを挟む。その間もフォームは編集できるが、
//! 送信済みのリクエストには影響しない（`Submission` がスナップショットを持つ）。

use crate::error::{Error, Result};
use crate::prompts::{DEFAULT_PROMPT, MISSING_INPUT_MESSAGE};
use crate::types::{EncodedImage, FormState, ImageRole};

/// 送信結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestOutcome {
    #[default]
    Idle,
    InFlight,
    /// 生成画像のData URL
    Succeeded(String),
    /// 画面に出すエラーメッセージ
    Failed(String),
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Idle => "idle",
            RequestOutcome::InFlight => "in-flight",
            RequestOutcome::Succeeded(_) => "succeeded",
            RequestOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestOutcome::InFlight)
    }

    pub fn result_url(&self) -> Option<&str> {
        match self {
            RequestOutcome::Succeeded(url) => Some(url),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// 送信1回分のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: u64,
    pub child_image: EncodedImage,
    pub adult_image: EncodedImage,
    pub prompt_text: String,
}

/// 画像生成の呼び出し口
///
/// CLIは reqwest、テストはスタブで実装する。
#[allow(async_fn_in_trait)]
pub trait ImageGenerator {
    /// 成功時は生成画像のData URLを返す
    async fn generate(
        &self,
        child: &EncodedImage,
        adult: &EncodedImage,
        prompt: &str,
    ) -> Result<String>;
}

/// フォーム + 送信状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    form: FormState,
    outcome: RequestOutcome,
    attempt: u64,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    /// 初期状態: 画像なし、既定プロンプト、Idle
    pub fn new() -> Self {
        Self::with_prompt(DEFAULT_PROMPT)
    }

    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            form: FormState {
                prompt_text: prompt.into(),
                ..Default::default()
            },
            outcome: RequestOutcome::Idle,
            attempt: 0,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn prompt(&self) -> &str {
        &self.form.prompt_text
    }

    pub fn image(&self, role: ImageRole) -> Option<&EncodedImage> {
        self.form.image(role)
    }

    /// スロットの画像を差し替える（Noneでクリア）
    pub fn set_image(&mut self, role: ImageRole, image: Option<EncodedImage>) {
        log::debug!(
            "{} slot {}",
            role,
            if image.is_some() { "set" } else { "cleared" }
        );
        self.form.set_image(role, image);
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.form.prompt_text = prompt.into();
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.form.is_complete() && !self.outcome.is_in_flight()
    }

    /// ボタンのラベル
    pub fn status_label(&self) -> &'static str {
        if self.outcome.is_in_flight() {
            "Reunifying..."
        } else {
            "Reunify Photos"
        }
    }

    /// 送信開始
    ///
    /// 入力が揃っていなければ Validation エラー（状態は変えない）。
    /// 成功すると前回の結果を消して InFlight に入る。
    pub fn begin_submit(&mut self) -> Result<Submission> {
        if self.outcome.is_in_flight() {
            return Err(Error::Validation(
                "A generation request is already in progress.".to_string(),
            ));
        }

        let (Some(child), Some(adult)) = (&self.form.child_image, &self.form.adult_image) else {
            return Err(Error::Validation(MISSING_INPUT_MESSAGE.to_string()));
        };
        if self.form.prompt_text.trim().is_empty() {
            return Err(Error::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }

        self.attempt += 1;
        let submission = Submission {
            attempt: self.attempt,
            child_image: child.clone(),
            adult_image: adult.clone(),
            prompt_text: self.form.prompt_text.clone(),
        };
        self.outcome = RequestOutcome::InFlight;
        log::info!("submission #{} started", self.attempt);

        Ok(submission)
    }

    /// 送信完了
    ///
    /// 現在の InFlight に対応しない `attempt` は無視して false を返す。
    pub fn finish(&mut self, attempt: u64, result: std::result::Result<String, String>) -> bool {
        if !self.outcome.is_in_flight() || attempt != self.attempt {
            log::warn!("ignoring stale result for submission #{}", attempt);
            return false;
        }

        self.outcome = match result {
            Ok(url) => {
                log::info!("submission #{} succeeded", attempt);
                RequestOutcome::Succeeded(url)
            }
            Err(message) => {
                log::warn!("submission #{} failed: {}", attempt, message);
                RequestOutcome::Failed(message)
            }
        };
        true
    }

    /// 送信してから結果を待つ（UIを持たない呼び出し側向け）
    ///
    /// Validation エラーは Err で返し、生成の失敗は `RequestOutcome::Failed` として返す。
    pub async fn submit_with<G: ImageGenerator>(&mut self, generator: &G) -> Result<&RequestOutcome> {
        let submission = self.begin_submit()?;
        let result = generator
            .generate(
                &submission.child_image,
                &submission.adult_image,
                &submission.prompt_text,
            )
            .await
            .map_err(|e| e.to_string());
        self.finish(submission.attempt, result);
        Ok(&self.outcome)
    }
}
