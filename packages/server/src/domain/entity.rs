//! Entity 定義
//!
//! Room はクイズ 1 セッション分の状態を持ち、状態遷移（join / start / answer / advance / end）を
//! 副作用なしで計算します。ロックと通知は UseCase 層の責務です。

use std::{collections::HashMap, sync::Arc};

use super::{
    error::{RoomError, ValueObjectError},
    value_object::{ConnectionId, Pin, PlayerName, Timestamp},
};

/// 正解 1 問あたりの得点
pub const CORRECT_ANSWER_POINTS: u32 = 10;

/// 1 問分のクイズ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct: usize,
}

impl Question {
    /// 問題を生成（検証は `QuestionSet::new` で行う）
    pub fn new(text: String, options: Vec<String>, correct: usize) -> Self {
        Self {
            text,
            options,
            correct,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }
}

/// Room に添付される問題列（不変・共有）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet(Arc<[Question]>);

impl QuestionSet {
    /// 問題列を検証して生成
    ///
    /// 少なくとも 1 問あり、各問題に 2 つ以上の選択肢があり、正解の index が範囲内であること。
    pub fn new(questions: Vec<Question>) -> Result<Self, ValueObjectError> {
        if questions.is_empty() {
            return Err(ValueObjectError::EmptyQuestionSet);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(ValueObjectError::TooFewOptions { index });
            }
            if question.correct >= question.options.len() {
                return Err(ValueObjectError::CorrectOptionOutOfRange {
                    index,
                    correct: question.correct,
                    options: question.options.len(),
                });
            }
        }
        Ok(Self(questions.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }
}

/// Room の参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: PlayerName,
    pub score: u32,
}

impl Player {
    pub fn new(name: PlayerName) -> Self {
        Self {
            name,
            score: 0,
        }
    }
}

/// ゲームの進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// 開始前（参加受付中）
    Lobby,
    /// 出題中
    InProgress,
    /// 終了（終端状態）
    Ended,
}

/// 出題内容（クライアントへ送るための読み取り専用ビュー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
    /// 0 始まりの問題番号
    pub index: usize,
    pub total: usize,
}

/// ゲーム終了時の集計結果 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    pub name: String,
    pub score: u32,
}

/// 回答を無視した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotInProgress,
    NotAPlayer,
}

/// 回答の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { score: u32 },
    Incorrect,
    Ignored(IgnoreReason),
}

/// `advance` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// 次の問題を出題する
    Question(QuestionView),
    /// 問題を使い切ったので終了する
    GameOver(Vec<PlayerResult>),
}

/// クイズの Room（1 ゲームセッション）
#[derive(Debug, Clone)]
pub struct Room {
    pin: Pin,
    host: ConnectionId,
    players: HashMap<ConnectionId, Player>,
    phase: GamePhase,
    current: usize,
    questions: QuestionSet,
    created_at: Timestamp,
}

impl Room {
    /// 新しい Room を Lobby 状態で作成
    pub fn new(
        pin: Pin,
        host: ConnectionId,
        questions: QuestionSet,
        created_at: Timestamp,
    ) -> Self {
        Self {
            pin,
            host,
            players: HashMap::new(),
            phase: GamePhase::Lobby,
            current: 0,
            questions,
            created_at,
        }
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn host(&self) -> ConnectionId {
        self.host
    }

    pub fn is_host(&self, connection_id: &ConnectionId) -> bool {
        self.host == *connection_id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Lobby
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, connection_id: &ConnectionId) -> Option<&Player> {
        self.players.get(connection_id)
    }

    pub fn players(&self) -> impl Iterator<Item = (&ConnectionId, &Player)> {
        self.players.iter()
    }

    pub fn player_ids(&self) -> Vec<ConnectionId> {
        self.players.keys().copied().collect()
    }

    /// ホストと全プレイヤーの接続 ID（ホストが参加している場合も 1 回だけ含む）
    pub fn recipients(&self) -> Vec<ConnectionId> {
        std::iter::once(self.host)
            .chain(self.players.keys().copied().filter(|id| *id != self.host))
            .collect()
    }

    /// 現在の問題のビュー（出題中のみ）
    pub fn current_question(&self) -> Option<QuestionView> {
        if self.phase != GamePhase::InProgress {
            return None;
        }
        self.question_view(self.current)
    }

    fn question_view(&self, index: usize) -> Option<QuestionView> {
        self.questions.get(index).map(|q| QuestionView {
            text: q.text().to_string(),
            options: q.options().to_vec(),
            index,
            total: self.questions.len(),
        })
    }

    /// プレイヤーを参加させる（得点 0 から開始）
    pub fn join(&mut self, connection_id: ConnectionId, name: PlayerName) -> Result<(), RoomError> {
        if self.phase == GamePhase::Ended {
            return Err(RoomError::GameOver);
        }
        if self.players.contains_key(&connection_id) {
            return Err(RoomError::AlreadyJoined);
        }
        self.players.insert(connection_id, Player::new(name));
        Ok(())
    }

    /// ゲームを開始し、最初の問題を返す
    pub fn start(&mut self, by: &ConnectionId) -> Result<QuestionView, RoomError> {
        if !self.is_host(by) {
            return Err(RoomError::NotHost);
        }
        match self.phase {
            GamePhase::Lobby => {}
            GamePhase::InProgress => return Err(RoomError::AlreadyStarted),
            GamePhase::Ended => return Err(RoomError::GameOver),
        }
        self.phase = GamePhase::InProgress;
        self.current = 0;
        // QuestionSet は空にならないので常に Some
        self.question_view(0).ok_or(RoomError::GameOver)
    }

    /// 回答を採点する
    ///
    /// 出題中でない・プレイヤーでない場合は何もしない。回答の回数は問わない。
    pub fn answer(&mut self, connection_id: &ConnectionId, choice: usize) -> AnswerOutcome {
        if self.phase != GamePhase::InProgress {
            return AnswerOutcome::Ignored(IgnoreReason::NotInProgress);
        }
        let Some(correct) = self.questions.get(self.current).map(Question::correct) else {
            return AnswerOutcome::Ignored(IgnoreReason::NotInProgress);
        };
        let Some(player) = self.players.get_mut(connection_id) else {
            return AnswerOutcome::Ignored(IgnoreReason::NotAPlayer);
        };

        if choice == correct {
            player.score += CORRECT_ANSWER_POINTS;
            AnswerOutcome::Correct {
                score: player.score,
            }
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// 次の問題へ進める
    ///
    /// 問題を使い切った場合は Ended に遷移して集計結果を返す。
    pub fn advance(&mut self, by: &ConnectionId) -> Result<Advance, RoomError> {
        if !self.is_host(by) {
            return Err(RoomError::NotHost);
        }
        match self.phase {
            GamePhase::InProgress => {}
            GamePhase::Lobby => return Err(RoomError::NotStarted),
            GamePhase::Ended => return Err(RoomError::GameOver),
        }

        self.current += 1;
        match self.question_view(self.current) {
            Some(view) => Ok(Advance::Question(view)),
            None => Ok(Advance::GameOver(self.end())),
        }
    }

    /// ゲームを終了させ、集計結果を返す
    pub fn end(&mut self) -> Vec<PlayerResult> {
        self.phase = GamePhase::Ended;
        self.results()
    }

    /// 得点の高い順（同点は名前順）の集計結果
    pub fn results(&self) -> Vec<PlayerResult> {
        let mut results: Vec<PlayerResult> = self
            .players
            .values()
            .map(|p| PlayerResult {
                name: p.name.as_str().to_string(),
                score: p.score,
            })
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        results
    }
}
