//! Phrase dictionary mapping known Chinese phrases to English.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::detect::contains_chinese;

/// Phrases shipped with the crate.
pub(crate) const BUILTIN_PHRASES: &[(&str, &str)] = &[
    // Player
    ("杨瀚森", "Yang Hansen"),
    ("瀚森", "Hansen"),
    // Teams and leagues
    ("波特兰开拓者", "Portland Trail Blazers"),
    ("开拓者队", "Trail Blazers"),
    ("开拓者", "Trail Blazers"),
    ("青岛国信海天", "Qingdao Guoxin Haitian"),
    ("青岛雄鹰", "Qingdao Eagles"),
    ("中国男篮", "China Men's National Basketball Team"),
    ("中国男子篮球职业联赛", "Chinese Basketball Association"),
    ("美国职业篮球联赛", "NBA"),
    // Places
    ("山东淄博", "Zibo, Shandong"),
    ("山东", "Shandong"),
    ("淄博", "Zibo"),
    ("青岛", "Qingdao"),
    ("波特兰", "Portland"),
    ("中国", "China"),
    // Positions
    ("中锋", "Center"),
    ("大前锋", "Power Forward"),
    ("小前锋", "Small Forward"),
    ("前锋", "Forward"),
    ("控球后卫", "Point Guard"),
    ("得分后卫", "Shooting Guard"),
    ("后卫", "Guard"),
    // Draft and season
    ("NBA选秀", "NBA Draft"),
    ("选秀", "Draft"),
    ("首轮", "First Round"),
    ("第16顺位", "16th Pick"),
    ("夏季联赛", "Summer League"),
    ("常规赛", "Regular Season"),
    ("季后赛", "Playoffs"),
    ("赛季", "Season"),
    ("新秀", "Rookie"),
    ("最佳新秀", "Rookie of the Year"),
    ("最佳防守球员", "Defensive Player of the Year"),
    ("全明星", "All-Star"),
    ("职业生涯", "Career"),
    // Stat labels
    ("场均得分", "Points Per Game"),
    ("场均篮板", "Rebounds Per Game"),
    ("场均助攻", "Assists Per Game"),
    ("场均盖帽", "Blocks Per Game"),
    ("得分", "Points"),
    ("篮板", "Rebounds"),
    ("助攻", "Assists"),
    ("盖帽", "Blocks"),
    ("抢断", "Steals"),
    ("失误", "Turnovers"),
    ("场均", "Per Game"),
    ("出场", "Games Played"),
    ("命中率", "Field Goal Percentage"),
    ("三分", "Three-Point"),
    ("罚球", "Free Throw"),
    ("分钟", "Minutes"),
    // Profile labels
    ("身高", "Height"),
    ("体重", "Weight"),
    ("年龄", "Age"),
    ("出生日期", "Date of Birth"),
    ("出生地", "Birthplace"),
    ("国籍", "Nationality"),
    ("球衣号码", "Jersey Number"),
    ("球队", "Team"),
    ("位置", "Position"),
    // Sections
    ("最新消息", "Latest News"),
    ("精彩视频", "Highlights"),
    ("比赛集锦", "Game Highlights"),
    ("球员介绍", "Player Profile"),
    ("数据统计", "Statistics"),
];

static BUILTIN: LazyLock<PhraseDictionary> = LazyLock::new(|| {
    PhraseDictionary::from_entries(
        BUILTIN_PHRASES
            .iter()
            .map(|(phrase, english)| ((*phrase).to_string(), (*english).to_string())),
    )
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Dictionary phrases cannot be empty")]
    EmptyPhrase,

    #[error("Dictionary phrase '{0}' contains no Chinese text")]
    PhraseWithoutChinese(String),

    #[error("Translation '{translation}' for phrase '{phrase}' still contains Chinese text")]
    ChineseTranslation { phrase: String, translation: String },
}

/// Immutable Chinese → English phrase table.
#[derive(Debug, Clone)]
pub struct PhraseDictionary {
    phrases: HashMap<String, String>,
    /// Keys ordered for substring substitution: longest first.
    order: Vec<String>,
}

impl PhraseDictionary {
    /// Builds a dictionary, rejecting entries that would break the
    /// "translated text contains no Chinese" guarantee.
    pub fn new<I>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = entries.into_iter().map(validate_entry).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_entries(entries))
    }

    /// The dictionary shipped with the crate.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builtin phrases plus `extra`. Extra phrases override builtin translations.
    pub fn with_extra<I>(extra: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let extra = extra.into_iter().map(validate_entry).collect::<Result<Vec<_>, _>>()?;
        let entries = Self::builtin().phrases.clone().into_iter().chain(extra);

        Ok(Self::from_entries(entries))
    }

    fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let phrases: HashMap<String, String> = entries.into_iter().collect();

        let mut order: Vec<String> = phrases.keys().cloned().collect();
        order.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        Self { phrases, order }
    }

    /// Exact-match lookup.
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.phrases.get(phrase).map(String::as_str)
    }

    /// Phrases with their translations, longest phrase first.
    pub fn substitution_order(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order.iter().filter_map(|phrase| {
            self.phrases.get(phrase).map(|english| (phrase.as_str(), english.as_str()))
        })
    }

    /// Replaces every known phrase occurring in `text`, longest phrase first.
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (phrase, english) in self.substitution_order() {
            if result.contains(phrase) {
                result = result.replace(phrase, english);
            }
        }
        result
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

fn validate_entry(
    (phrase, translation): (String, String),
) -> Result<(String, String), DictionaryError> {
    if phrase.is_empty() {
        return Err(DictionaryError::EmptyPhrase);
    }
    if !contains_chinese(&phrase) {
        return Err(DictionaryError::PhraseWithoutChinese(phrase));
    }
    if contains_chinese(&translation) {
        return Err(DictionaryError::ChineseTranslation { phrase, translation });
    }
    Ok((phrase, translation))
}
