use crate::errors::StorageError;
use crate::storage::{KeyValueStore, LANGUAGE_KEY};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Pl,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Pl];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Pl => "pl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            "pl" => Some(Language::Pl),
            _ => None,
        }
    }
}

/// Strings rendered on the calendar page.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub sessions: &'static str,
    pub personal_bests: &'static str,
    pub block: &'static str,
    pub rest: &'static str,
    pub today: &'static str,
    pub ready: &'static str,
    pub completed: &'static str,
    pub select_block: &'static str,
    pub session_summary: &'static str,
    pub save: &'static str,
    pub remove: &'static str,
    pub close: &'static str,
    pub last_time: &'static str,
    pub weight: &'static str,
    pub reps: &'static str,
    pub set: &'static str,
    pub duration: &'static str,
    pub start: &'static str,
    pub finish: &'static str,
    pub monthly_report: &'static str,
    pub days: &'static str,
    pub footer: &'static str,
    pub language: &'static str,
    pub previous_month: &'static str,
    pub next_month: &'static str,
    pub weekdays: [&'static str; 7],
    pub months: [&'static str; 12],
}

impl Labels {
    /// Month name for a 1-based month, empty outside 1..=12.
    pub fn month_name(&self, month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|index| self.months.get(index as usize))
            .copied()
            .unwrap_or("")
    }
}

const EN: Labels = Labels {
    title: "BLOCK TRAINING",
    subtitle: "Progress Tracker",
    sessions: "Sessions",
    personal_bests: "Personal Bests (Max Weight x Reps)",
    block: "Block",
    rest: "Rest",
    today: "Today",
    ready: "Ready",
    completed: "Completed",
    select_block: "Select Training Block",
    session_summary: "Session Summary",
    save: "Save Workout",
    remove: "Remove Entry",
    close: "Close",
    last_time: "Last",
    weight: "Weight",
    reps: "Reps",
    set: "Set",
    duration: "Workout Time (min)",
    start: "START",
    finish: "FINISH",
    monthly_report: "Monthly Achievement",
    days: "days",
    footer: "Visualize your progress",
    language: "Language",
    previous_month: "Previous month",
    next_month: "Next month",
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
};

const RU: Labels = Labels {
    title: "БЛОЧНЫЕ ТРЕНИРОВКИ",
    subtitle: "Трекер прогресса",
    sessions: "Сессии",
    personal_bests: "Личные рекорды (Макс. Вес x Повторы)",
    block: "Блок",
    rest: "Отдых",
    today: "Сегодня",
    ready: "Готов",
    completed: "Завершено",
    select_block: "Выберите блок тренировки",
    session_summary: "Итоги сессии",
    save: "Сохранить",
    remove: "Удалить",
    close: "Закрыть",
    last_time: "Прошлый раз",
    weight: "Вес",
    reps: "Повторы",
    set: "Подход",
    duration: "Время тренировки (мин)",
    start: "СТАРТ",
    finish: "ЗАКОНЧИТЬ",
    monthly_report: "Достижения за месяц",
    days: "дн.",
    footer: "Визуализируйте свой прогресс",
    language: "Язык",
    previous_month: "Предыдущий месяц",
    next_month: "Следующий месяц",
    weekdays: ["Вс", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"],
    months: [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
        "Октябрь", "Ноябрь", "Декабрь",
    ],
};

const PL: Labels = Labels {
    title: "TRENING BLOKOWY",
    subtitle: "Monitor postępów",
    sessions: "Sesje",
    personal_bests: "Rekordy życiowe (Maks. Ciężar x Powt.)",
    block: "Blok",
    rest: "Odpoczynek",
    today: "Dziś",
    ready: "Gotowy",
    completed: "Ukończono",
    select_block: "Wybierz blok treningowy",
    session_summary: "Podsumowanie sesji",
    save: "Zapisz trening",
    remove: "Usuń wpis",
    close: "Zamknij",
    last_time: "Ostatnio",
    weight: "Ciężar",
    reps: "Powt.",
    set: "Seria",
    duration: "Czas treningu (min)",
    start: "START",
    finish: "KONIEC",
    monthly_report: "Osiągnięcia miesiąca",
    days: "dni",
    footer: "Wizualizuj swoje postępy",
    language: "Język",
    previous_month: "Poprzedni miesiąc",
    next_month: "Następny miesiąc",
    weekdays: ["Nie", "Pon", "Wt", "Śr", "Czw", "Pt", "Sob"],
    months: [
        "Styczeń", "Luty", "Marzec", "Kwiecień", "Maj", "Czerwiec", "Lipiec", "Sierpień", "Wrzesień",
        "Październik", "Listopad", "Grudzień",
    ],
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ru => &RU,
        Language::Pl => &PL,
    }
}

/// The saved language, `en` when nothing usable is stored.
pub async fn load_language<S: KeyValueStore>(store: &S) -> Result<Language, StorageError> {
    let Some(raw) = store.get(LANGUAGE_KEY).await? else {
        return Ok(Language::default());
    };
    match Language::from_code(&raw) {
        Some(language) => Ok(language),
        None => {
            warn!("ignoring stored language {raw:?}");
            Ok(Language::default())
        }
    }
}

pub async fn persist_language<S: KeyValueStore>(
    store: &S,
    language: Language,
) -> Result<(), StorageError> {
    store.set(LANGUAGE_KEY, language.code()).await
}
