use std::env;

/// Console messages, selected once per lookup from the `LANG` environment
/// variable. Placeholders are substituted with `str::replace`.
pub struct Messages {
    pub event_created: &'static str,
    pub event_deleted: &'static str,
    pub setup_complete: &'static str,
}

const EN: Messages = Messages {
    event_created: "Created the event: {summary}",
    event_deleted: "Deleted the event: {event}",
    setup_complete: "Saved the credential for calendar: {calendar}",
};

const JA: Messages = Messages {
    event_created: "イベントを作成しました: {summary}",
    event_deleted: "イベントを削除しました: {event}",
    setup_complete: "カレンダーの認証情報を保存しました: {calendar}",
};

pub fn messages() -> &'static Messages {
    match env::var("LANG") {
        Ok(lang) if lang.to_lowercase().starts_with("ja") => &JA,
        _ => &EN,
    }
}
