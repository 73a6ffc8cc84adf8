//! User-facing text in English and Japanese.

use std::str::FromStr;

use anyhow::bail;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ja,
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Self::En),
            "JA" => Ok(Self::Ja),
            other => bail!("KAKI_LANG must be EN or JA, got {other}"),
        }
    }
}

impl Lang {
    pub fn loading(self) -> &'static str {
        match self {
            Self::En => "Loading...",
            Self::Ja => "読み込み中...",
        }
    }

    pub fn correct(self) -> &'static str {
        match self {
            Self::En => "Correct!",
            Self::Ja => "正解！",
        }
    }

    pub fn incorrect(self) -> &'static str {
        match self {
            Self::En => "Incorrect.",
            Self::Ja => "不正解。",
        }
    }

    pub fn complete(self) -> &'static str {
        match self {
            Self::En => "Congratulations! You finished every word in this category.",
            Self::Ja => "おめでとうございます！このカテゴリーの単語をすべて学習しました。",
        }
    }

    pub fn pick_category(self) -> &'static str {
        match self {
            Self::En => "Choose a category (q to quit):",
            Self::Ja => "カテゴリーを選んでください（q で終了）：",
        }
    }

    pub fn no_categories(self) -> &'static str {
        match self {
            Self::En => "No categories available.",
            Self::Ja => "カテゴリーがありません。",
        }
    }

    pub fn question_help(self) -> &'static str {
        match self {
            Self::En => "[1-4] answer  [d] details  [c] category  [q] quit",
            Self::Ja => "[1-4] 回答  [d] 詳細  [c] カテゴリー  [q] 終了",
        }
    }

    pub fn answered_help(self) -> &'static str {
        match self {
            Self::En => "[Enter/n] next  [d] details  [c] category  [q] quit",
            Self::Ja => "[Enter/n] 次へ  [d] 詳細  [c] カテゴリー  [q] 終了",
        }
    }

    pub fn halted(self) -> &'static str {
        match self {
            Self::En => "Session stopped. Press c to choose another category.",
            Self::Ja => "セッションを中断しました。c で別のカテゴリーを選べます。",
        }
    }

    pub fn remaining(self, count: usize) -> String {
        match self {
            Self::En => format!("{count} remaining"),
            Self::Ja => format!("残り {count} 語"),
        }
    }
}
