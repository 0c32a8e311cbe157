//! Card catalog: button labels and texts for every stage and choice.
//!
//! The catalog is plain static data. Two sets ship with the bot: the full
//! Herzen University card deck and a placeholder deck with the same shape and
//! neutral texts, used while new cards are being written. Lookups never fail; gaps in the data produce
//! [`FALLBACK_TEXT`] or a numbered label.

use std::borrow::Cow;

use feedcat_common::CatalogKind;

use super::game_progress::{CHOICES_PER_STAGE, Choice, Stage};

/// Shown when a stage or choice has no text.
pub const FALLBACK_TEXT: &str = "Информация отсутствует.";

/// Labels and texts for one stage, ordered by choice.
#[derive(Debug, Clone, Copy)]
pub struct StageContent {
    pub labels: [&'static str; CHOICES_PER_STAGE as usize],
    pub texts: [&'static str; CHOICES_PER_STAGE as usize],
}

/// Read-only card catalog.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    stages: &'static [StageContent],
}

impl Catalog {
    /// Catalog backed by arbitrary static data. Stage `n` reads `stages[n - 1]`.
    #[must_use]
    pub const fn new(stages: &'static [StageContent]) -> Self {
        Self { stages }
    }

    /// The full card deck.
    #[must_use]
    pub fn herzen() -> Self {
        Self::new(&HERZEN_STAGES)
    }

    /// Placeholder deck.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(&PLACEHOLDER_STAGES)
    }

    /// Catalog selected in configuration.
    #[must_use]
    pub fn from_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Herzen => Self::herzen(),
            CatalogKind::Placeholder => Self::placeholder(),
        }
    }

    /// Text shown after picking `choice` on `stage`.
    #[must_use]
    pub fn stage_text(&self, stage: Stage, choice: Choice) -> &'static str {
        self.stages
            .get(stage.index())
            .map(|content| content.texts[choice.index()])
            .filter(|text| !text.is_empty())
            .unwrap_or(FALLBACK_TEXT)
    }

    /// Button labels for `stage`, ordered by choice.
    #[must_use]
    pub fn choice_labels(&self, stage: Stage) -> [Cow<'static, str>; CHOICES_PER_STAGE as usize] {
        let content = self.stages.get(stage.index());
        std::array::from_fn(|i| match content.map(|c| c.labels[i]) {
            Some(label) if !label.is_empty() => Cow::Borrowed(label),
            _ => Cow::Owned(format!("{stage}.{}", i + 1)),
        })
    }
}

macro_rules! placeholder_stage {
    ($n:literal) => {
        StageContent {
            labels: [
                concat!("Карточка ", $n, ".1"),
                concat!("Карточка ", $n, ".2"),
                concat!("Карточка ", $n, ".3"),
            ],
            texts: [
                "<b>Задание:</b> Текст задания появится здесь.",
                "<b>Вопрос:</b> Текст вопроса появится здесь.",
                "<b>Упражнение:</b> Текст упражнения появится здесь.",
            ],
        }
    };
}

static PLACEHOLDER_STAGES: [StageContent; 9] = [
    placeholder_stage!("1"),
    placeholder_stage!("2"),
    placeholder_stage!("3"),
    placeholder_stage!("4"),
    placeholder_stage!("5"),
    placeholder_stage!("6"),
    placeholder_stage!("7"),
    placeholder_stage!("8"),
    placeholder_stage!("9"),
];

static HERZEN_STAGES: [StageContent; 9] = [
    StageContent {
        labels: [
            "1.1 Преодолевая преграды",
            "1.2 Действие - мой инструмент",
            "1.3 Сила маленьких шагов",
        ],
        texts: [
            "<b>Вопросы:</b>\n\
             • Что самое сложное вы преодолели за последний год?\n\
             • Какие уроки вы извлекли из этого опыта?\n\n\
             <b>Задание:</b> Нарисуйте или напишите, как вы видите свой путь к цели, несмотря на преграды.",
            "<b>Упражнение:</b> Выберите одну задачу, которая вызывает у вас сомнения. \
             Сформулируйте её в виде первого конкретного шага и выполните его.\n\n\
             <b>Совет:</b> Начните с малого, но начинайте. Это откроет дорогу большим успехам.",
            "<b>Упражнение:</b> Разделите сложную задачу на три небольших шага и выполните их поэтапно.\n\n\
             <b>Совет:</b> Не перегружайте себя сразу. Делайте маленькие, но уверенные шаги.",
        ],
    },
    StageContent {
        labels: [
            "2.1 Ресурсы внутри меня",
            "2.2 Используя каждый момент",
            "2.3 Возможности общения",
        ],
        texts: [
            "<b>Упражнение:</b> Составьте список из 5 своих качеств, которые помогают вам справляться с трудностями.\n\n\
             <b>Совет:</b> Напоминайте себе о своих сильных сторонах каждый раз, когда сталкиваетесь с вызовом.",
            "<b>Упражнение:</b> Напишите три возможности, которые у вас есть прямо сейчас. \
             Какие шаги вы можете предпринять, чтобы их реализовать?\n\n\
             <b>Совет:</b> Искать возможности полезно даже в простых повседневных делах.",
            "<b>Упражнение:</b> Позвоните или напишите человеку, который может поддержать вас или дать совет. \
             Что нового вы можете узнать от него?\n\n\
             <b>Совет:</b> Общение открывает неожиданные перспективы.",
        ],
    },
    StageContent {
        labels: [
            "3.1 Социальное восприятие",
            "3.2 Принятие в группе",
            "3.3 Значимые отношения",
        ],
        texts: [
            "<b>Задание:</b> Напишите, как вы воспринимаете чужое мнение о себе.\n\
             • Что помогает вам оставаться уверенным в себе, несмотря на внешние воздействия?",
            "<b>Задание:</b> Вспомните, когда вы почувствовали поддержку и принятие \
             со стороны одногруппников или преподавателей.\n\
             Как это повлияло на вашу уверенность в своих силах?\n\
             Как вы можете создать атмосферу принятия для других людей в группе?",
            "<b>Вопрос:</b> Кто в вашей жизни влияет на ваши решения?\n\
             <b>Задание:</b> Напишите о трех людях, чье мнение для вас наиболее значимо.\n\
             Что именно в их словах или действиях помогает вам чувствовать себя уверенно?",
        ],
    },
    StageContent {
        labels: [
            "4.1 Общение с группой",
            "4.2 Социальная батарейка",
            "4.3 Тёплый круг общения",
        ],
        texts: [
            "<b>Задание:</b> Подумайте о своем последнем взаимодействии с кем-то из группы.\n\
             Были ли вы довольны общением?\n\
             Что можно улучшить в вашем взаимодействии, чтобы почувствовать большую удовлетворенность?",
            "<b>Задание:</b> Оцените свою «социальную батарейку» от 0 до 10.\n\
             После каждой ситуации взаимодействия подумайте, заряжает она вас или разряжает.\n\
             Какие взаимодействия помогают вам «зарядиться»?",
            "<b>Задание:</b> Напишите анонимно комплименты или добрые слова для трех человек из группы.\n\
             Передайте их, и обсудите, как такие жесты влияют на атмосферу.\n\n\
             <b>Вопросы:</b> Когда вы в последний раз слышали искреннюю похвалу в свой адрес?\n\
             Как это на вас повлияло?",
        ],
    },
    StageContent {
        labels: ["5.1 Личные границы", "5.2 Как сказать НЕТ", "5.3 Чужие ожидания"],
        texts: [
            "<b>Задание:</b> Напишите, как вы определяете свои личные границы в отношениях с другими людьми.\n\
             Какие фразы или действия помогают вам устанавливать эти границы и защищаться от манипуляций?",
            "<b>Задание:</b> Представьте ситуацию, когда одногруппник или друг просит вас сделать что-то, \
             что вам неудобно. Сыграйте диалог, где вы вежливо, но твердо отказываете.\n\n\
             <b>Вопрос:</b> Что для вас сложнее: говорить “нет” близким людям или одногруппникам? Почему?",
            "<b>Задание:</b> Напишите три ожидания, которые вы чувствуете от окружающих.\n\
             Решите, какие из них соответствуют вашим ценностям, а какие — нет.\n\n\
             <b>Вопрос:</b> Как вы справляетесь с ситуациями, когда ожидания окружающих не совпадают \
             с вашими желаниями?",
        ],
    },
    StageContent {
        labels: [
            "6.1 Новый город - новые возможности",
            "6.2 Вопросы быта",
            "6.3 Зов родного края",
        ],
        texts: [
            "<b>Задание:</b> Поделитесь, какие трудности могут возникнуть при переезде для учёбы.\n\
             Обсудите, как можно быстрее освоиться в новом месте.\n\n\
             <b>Вопрос:</b> Какие шаги помогут вам адаптироваться к жизни в незнакомом городе?",
            "<b>Задание:</b> Подумайте, что сложнее всего в самостоятельной жизни.\n\
             Какие лайфхаки помогают вам быстрее обустроиться в новом месте?",
            "<b>Задание:</b> Поделитесь способами, которые помогают вам справляться с ностальгией.\n\n\
             <b>Вопрос:</b> Какие новые привычки могут помочь быстрее адаптироваться в новом месте?",
        ],
    },
    StageContent {
        labels: [
            "7.1 Культурный шок",
            "7.2 В поиске новых друзей",
            "7.3 Связь с культурой",
        ],
        texts: [
            "<b>Задание:</b> Вспомните случай, когда вы столкнулись с культурными различиями.\n\
             Как вы справились с этой ситуацией?\n\n\
             <b>Вопрос:</b> Как можно наладить общение с представителями других культур?",
            "<b>Задание:</b> Поделитесь своими способами заведения знакомств в новой среде.\n\
             Какие темы лучше не поднимать в начале общения?\n\n\
             <b>Вопрос:</b> Как легко и естественно влиться в новую компанию?",
            "<b>Задание:</b> Напишите, какие способы помогают сохранять связь со своими традициями \
             и родным языком в новой среде.\n\n\
             <b>Вопрос:</b> Как можно интегрироваться в новую культуру, не теряя связи с родной?",
        ],
    },
    StageContent {
        labels: [
            "8.1 Экзаменационный стресс",
            "8.2 Новые вызовы учёбы",
            "8.3 Слишком много информации",
        ],
        texts: [
            "<b>Задание:</b> Поделитесь своими методами борьбы с тревогой перед экзаменами.\n\
             Что помогает вам сохранять спокойствие?",
            "<b>Задание:</b> Вспомните ситуацию, когда вы не понимали задание или требования. Как вы нашли выход?\n\n\
             <b>Вопрос:</b> Что делать, если задание кажется непонятным или слишком сложным?",
            "<b>Задание:</b> Обсудите, как можно быстрее разбираться в больших объёмах информации.\n\n\
             <b>Вопрос:</b> Что помогает вам справляться с информационной перегрузкой?",
        ],
    },
    StageContent {
        labels: ["9.1 Новые смыслы", "9.2 В поисках баланса", "9.3 Принятие"],
        texts: [
            "<b>Задание:</b> Вспомните моменты, когда вы теряли мотивацию. Как вы справлялись с этим?\n\n\
             <b>Вопрос:</b> Что делать, если пропало желание учиться?",
            "<b>Задание:</b> Поделитесь своими методами организации времени. Какие привычки помогают вам всё успевать?\n\n\
             <b>Вопрос:</b> Как правильно расставлять приоритеты и не перегружать себя?",
            "<b>Задание:</b> Вспомните случаи, когда вам было сложно объяснить родителям свою точку зрения.\n\
             Как вы с этим справились?\n\n\
             <b>Вопрос:</b> Как построить конструктивный диалог с родителями?",
        ],
    },
];
