//! Static bot copy: menu labels, prompts and the longer informational texts.

#![allow(missing_docs)]

// Main menu
pub const MENU_FEEDBACK: &str = "Обратная связь";
pub const MENU_GAME: &str = "Игра";
pub const MENU_RESOURCES: &str = "Цифровые ресурсы";
pub const MENU_HELP: &str = "Помощь";

/// Main menu labels in display order, two per row.
pub const MAIN_MENU: [&str; 4] = [MENU_FEEDBACK, MENU_GAME, MENU_RESOURCES, MENU_HELP];

pub const GREETING_CAPTION: &str = "<b>Уважаемый студент! Я <s>бот</s> кот для сбора обратной связи.</b>\n\
<b>Для того, чтобы поделиться тем, что тебе понравилось и/или ты хотел бы добавить, нажми кнопку ниже.</b>";

pub const HELP_TEXT: &str = "<b>Для того, чтобы оставить обратную связь, нужно:</b>\n\
1. Нажать на кнопку 'Обратная связь'.\n\
2. Выбрать тип обратной связи.\n\
3. Написать свое сообщение.\n\
4. Отправить его.\n\
\n\
<b>Кнопка 'Цифровые ресурсы' содержит полезные ссылки.</b>\n\
\n\
<b>Чтобы приступить к интерактиву - нажмите кнопку 'Игра'.</b>\n\
Выберите одну из предложенных карточек, затем выполните задание, либо ответьте на вопрос\n\
Кнопка 'Дальше', чтобы продолжить, пока не дойдете до конца.";

pub const RESOURCES_CAPTION: &str = "<b>📚 Психологическая служба РГПУ им. А. И. Герцена</b>\n\
Помощь и поддержка студентов.\n\
👉 <a href=\"https://inpsy.hspu.org/\">Сайт психологической службы</a>\n\
\n\
<b>🖼️ Виртуальный тур по Русскому музею</b>\n\
👉 <a href=\"https://virtual.rusmuseumvrm.ru\">Посетить музей</a>\n\
\n\
<b>💪 Студенческий фитнес клуб \"PROFIT\"</b>\n\
👉 <a href=\"https://vk.com/studprofit\">Записаться в клуб</a>\n\
\n\
<b>🎮 Герценовский игровой клуб</b>\n\
👉 <a href=\"https://vk.com/herzengame\">Присоединиться</a>\n\
\n\
<b>🌍 Атлас студенческих объединений</b>\n\
👉 <a href=\"https://www.herzen.spb.ru/about/struct-uni/contr/dep-edu-pract-youth-projects/atlas-studencheskikh-obedineniy/\">Смотреть атлас</a>";

// Feedback flow
pub const FEEDBACK_CHOOSE_CATEGORY: &str = "Выберите тип обратной связи:";
pub const FEEDBACK_LIKED_LABEL: &str = "Что понравилось";
pub const FEEDBACK_ADD_LABEL: &str = "Что можно добавить";
pub const FEEDBACK_PROMPT: &str = "Напишите вашу обратную связь:";
pub const FEEDBACK_CANCEL_LABEL: &str = "Отмена";
pub const FEEDBACK_CANCELLED: &str = "Отмена отправки сообщения";
pub const FEEDBACK_THANKS: &str = "✅ Спасибо за вашу обратную связь! Хотите добавить что-то ещё?";
pub const FEEDBACK_END_LABEL: &str = "Завершить";
pub const FEEDBACK_END_TOAST: &str = "Спасибо за участие!";
pub const FEEDBACK_ENDED: &str =
    "Обратная связь завершена. Если хотите, можете продолжить игру.";
pub const FEEDBACK_SAVE_FAILED: &str = "😿 Не удалось сохранить вашу обратную связь. \
Пожалуйста, попробуйте отправить сообщение ещё раз чуть позже.";

// Game flow
pub const GAME_ALREADY_CHOSEN: &str = "Вы уже выбрали картинку!";
pub const GAME_CONTINUE_PROMPT: &str = "Продолжить игру!";
pub const GAME_NEXT_LABEL: &str = "Дальше →";
pub const GAME_CARD_UNAVAILABLE: &str = "Изображение временно недоступно";
pub const GAME_COMPLETED: &str =
    "🎉 Вы завершили игру! Нажмите на 'Обратная связь' и поделитесь ею.";
