//! テスト用のフェイクプロバイダAPI
//!
//! 実際のコンソールの振る舞いを台本どおりに再現する。送信された入力は
//! 本物のコンソールと同様にバッファへエコーされ、台本に従って
//! センチネル行（`$?` を終了ステータスへ置換したもの）が数回の
//! ポーリング後に現れる。全API呼び出しを数え、テストから検証できる。

use async_trait::async_trait;
use pawgit::common::error::PawgitError;
use pawgit::common::result::PawgitResult;
use pawgit::domain::entities::console::{ConsoleInfo, CpuUsage};
use pawgit::infrastructure::api::console_api::ConsoleApi;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// 1コマンド分の台本応答
#[derive(Debug, Clone)]
pub struct ScriptedCommand {
    /// センチネル行の前に現れる出力テキスト
    pub output: String,
    /// `$?` に置換される終了ステータス
    pub exit_code: i32,
    /// センチネルが現れるまでに必要なポーリング回数
    pub polls_until_done: usize,
    /// 完了時にそれまでのバッファ内容を破棄するかどうか
    pub truncate_before_completion: bool,
}

impl ScriptedCommand {
    /// 出力なしで即座に成功する
    pub fn success() -> Self {
        Self {
            output: String::new(),
            exit_code: 0,
            polls_until_done: 1,
            truncate_before_completion: false,
        }
    }

    /// 指定した出力と終了ステータスで1回のポーリング後に完了する
    pub fn with_output(output: &str, exit_code: i32) -> Self {
        Self {
            output: output.to_string(),
            exit_code,
            polls_until_done: 1,
            truncate_before_completion: false,
        }
    }

    /// 指定したポーリング回数の後に完了する
    pub fn delayed(output: &str, exit_code: i32, polls_until_done: usize) -> Self {
        Self {
            output: output.to_string(),
            exit_code,
            polls_until_done,
            truncate_before_completion: false,
        }
    }

    /// センチネルが永遠に現れない（タイムアウトの再現用）
    pub fn never_completes() -> Self {
        Self {
            output: String::new(),
            exit_code: 0,
            polls_until_done: usize::MAX,
            truncate_before_completion: false,
        }
    }

    /// 完了時にローリングバッファの縮小を再現する
    ///
    /// このコマンドのセンチネルが現れる瞬間、それまでのバッファ内容が
    /// プロバイダ側で溢れて消えた状態になる。
    pub fn with_truncation(mut self) -> Self {
        self.truncate_before_completion = true;
        self
    }
}

/// エコー済みでセンチネル未出力のコマンド
struct PendingCommand {
    appended_text: String,
    polls_remaining: usize,
    truncate_before_completion: bool,
}

/// API呼び出し回数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create: usize,
    pub info: usize,
    pub send_input: usize,
    pub latest_output: usize,
    pub destroy: usize,
    pub list: usize,
    pub cpu: usize,
    pub path_exists: usize,
}

impl CallCounts {
    /// コンソールのライフサイクルに触れた回数の合計
    pub fn console_lifecycle_total(&self) -> usize {
        self.create + self.info + self.send_input + self.latest_output + self.destroy
    }
}

#[derive(Default)]
struct FakeState {
    buffer: String,
    pending: Option<PendingCommand>,
    scripts: Vec<(String, ScriptedCommand)>,
    sent_inputs: Vec<String>,
    next_console_id: u64,
    live_consoles: HashSet<u64>,
    activation_delay_polls: usize,
    activation_countdown: HashMap<u64, usize>,
    existing_paths: HashSet<String>,
    fail_create: bool,
    fail_destroy: bool,
    fail_send_input: Option<String>,
    counts: CallCounts,
}

/// カウント付きのフェイクConsoleApi実装
pub struct FakeConsoleApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeConsoleApi {
    /// 新しいフェイクを作成
    pub fn new() -> Self {
        let state = FakeState {
            next_console_id: 1000,
            ..FakeState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// 既に生きているコンソールを登録する（永続コンソールの再現）
    pub fn with_live_console(self, console_id: u64) -> Self {
        self.state
            .lock()
            .unwrap()
            .live_consoles
            .insert(console_id);
        self
    }

    /// 作成直後のコンソールが照会可能になるまでのポーリング回数を設定
    pub fn set_activation_delay_polls(&self, polls: usize) {
        self.state.lock().unwrap().activation_delay_polls = polls;
    }

    /// リモートホスト上に存在するパスを登録
    pub fn add_existing_path(&self, path: &str) {
        self.state
            .lock()
            .unwrap()
            .existing_paths
            .insert(path.to_string());
    }

    /// 送信コマンドが `needle` を含むときに使う台本を登録
    ///
    /// 登録順に最初に一致したものが使われ、一致がなければ即時成功になる。
    /// 台本は消費されないので、リトライされた同じコマンドにも同じ応答を返す。
    pub fn script_for(&self, needle: &str, script: ScriptedCommand) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .push((needle.to_string(), script));
    }

    /// コンソール作成を失敗させる
    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    /// コンソール破棄を失敗させる
    pub fn set_fail_destroy(&self, fail: bool) {
        self.state.lock().unwrap().fail_destroy = fail;
    }

    /// 入力送信を指定メッセージのネットワークエラーで失敗させる
    pub fn set_fail_send_input(&self, message: Option<&str>) {
        self.state.lock().unwrap().fail_send_input = message.map(str::to_string);
    }

    /// これまでのAPI呼び出し回数を取得
    pub fn counts(&self) -> CallCounts {
        self.state.lock().unwrap().counts
    }

    /// 送信された入力行の履歴を取得
    pub fn sent_inputs(&self) -> Vec<String> {
        self.state.lock().unwrap().sent_inputs.clone()
    }

    /// 現在のバッファ内容を取得
    pub fn buffer(&self) -> String {
        self.state.lock().unwrap().buffer.clone()
    }

    fn script_matching(state: &FakeState, input: &str) -> ScriptedCommand {
        state
            .scripts
            .iter()
            .find(|(needle, _)| input.contains(needle.as_str()))
            .map(|(_, script)| script.clone())
            .unwrap_or_else(ScriptedCommand::success)
    }

    fn console_info_payload(console_id: u64) -> ConsoleInfo {
        ConsoleInfo {
            id: console_id,
            user: Some("alice".to_string()),
            executable: Some("bash".to_string()),
            arguments: None,
            working_directory: None,
            name: None,
            console_url: None,
        }
    }
}

impl Default for FakeConsoleApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsoleApi for FakeConsoleApi {
    async fn create_console(&self) -> PawgitResult<ConsoleInfo> {
        let mut state = self.state.lock().unwrap();
        state.counts.create += 1;

        if state.fail_create {
            return Err(PawgitError::network_error("simulated create failure", None));
        }

        state.next_console_id += 1;
        let id = state.next_console_id;
        state.live_consoles.insert(id);
        let delay = state.activation_delay_polls;
        state.activation_countdown.insert(id, delay);
        Ok(Self::console_info_payload(id))
    }

    async fn console_info(&self, console_id: u64) -> PawgitResult<Option<ConsoleInfo>> {
        let mut state = self.state.lock().unwrap();
        state.counts.info += 1;

        if !state.live_consoles.contains(&console_id) {
            return Ok(None);
        }

        // 作成直後はまだ照会できない
        if let Some(remaining) = state.activation_countdown.get_mut(&console_id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(None);
            }
        }

        Ok(Some(Self::console_info_payload(console_id)))
    }

    async fn send_input(&self, console_id: u64, input: &str) -> PawgitResult<()> {
        let mut state = self.state.lock().unwrap();
        state.counts.send_input += 1;
        state.sent_inputs.push(input.to_string());

        if let Some(message) = &state.fail_send_input {
            let message = message.clone();
            return Err(PawgitError::network_error(message, None));
        }
        if !state.live_consoles.contains(&console_id) {
            return Err(PawgitError::console_unavailable(
                "console does not exist",
                Some(console_id),
            ));
        }

        let script = Self::script_matching(&state, input);

        // 実コンソールと同様に入力はそのままエコーされる。引用符は
        // 剥がされないため、エコーにセンチネルの連結済みトークンは現れない。
        state.buffer.push_str(input);
        state.buffer.push_str("\r\n");

        // シェルが出力するはずのセンチネル行を組み立てる
        let sentinel_line = match input.rfind(" ; echo ") {
            Some(position) => input[position + 8..]
                .replace('"', "")
                .replace("$?", &script.exit_code.to_string()),
            None => format!("exit {}", script.exit_code),
        };

        let mut appended_text = String::new();
        if !script.output.is_empty() {
            appended_text.push_str(&script.output);
            appended_text.push('\n');
        }
        appended_text.push_str(&sentinel_line);
        appended_text.push('\n');

        state.pending = Some(PendingCommand {
            appended_text,
            polls_remaining: script.polls_until_done,
            truncate_before_completion: script.truncate_before_completion,
        });
        Ok(())
    }

    async fn latest_output(&self, console_id: u64) -> PawgitResult<String> {
        let mut state = self.state.lock().unwrap();
        state.counts.latest_output += 1;

        if !state.live_consoles.contains(&console_id) {
            return Err(PawgitError::console_unavailable(
                "console does not exist",
                Some(console_id),
            ));
        }

        let completed = match &mut state.pending {
            Some(pending) if pending.polls_remaining <= 1 => {
                Some((pending.appended_text.clone(), pending.truncate_before_completion))
            }
            Some(pending) => {
                pending.polls_remaining -= 1;
                None
            }
            None => None,
        };
        if let Some((text, truncate)) = completed {
            state.pending = None;
            if truncate {
                state.buffer.clear();
            }
            state.buffer.push_str(&text);
        }

        Ok(state.buffer.clone())
    }

    async fn destroy_console(&self, console_id: u64) -> PawgitResult<()> {
        let mut state = self.state.lock().unwrap();
        state.counts.destroy += 1;

        if state.fail_destroy {
            return Err(PawgitError::network_error(
                "simulated destroy failure",
                None,
            ));
        }

        state.live_consoles.remove(&console_id);
        Ok(())
    }

    async fn list_consoles(&self) -> PawgitResult<Vec<ConsoleInfo>> {
        let mut state = self.state.lock().unwrap();
        state.counts.list += 1;

        let mut ids: Vec<u64> = state.live_consoles.iter().copied().collect();
        ids.sort_unstable();
        Ok(ids.into_iter().map(Self::console_info_payload).collect())
    }

    async fn cpu_usage(&self) -> PawgitResult<CpuUsage> {
        let mut state = self.state.lock().unwrap();
        state.counts.cpu += 1;

        Ok(CpuUsage {
            daily_cpu_limit_seconds: Some(100.0),
            daily_cpu_total_usage_seconds: Some(42.5),
            next_reset_time: Some("2026-01-01T00:00:00".to_string()),
        })
    }

    async fn path_exists(&self, path: &str) -> PawgitResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.counts.path_exists += 1;

        Ok(state.existing_paths.contains(path))
    }
}
