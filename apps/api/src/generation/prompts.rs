//! Prompt construction for résumé generation.
//!
//! Everything here is pure: the same profile and style in, a byte-identical
//! prompt out. No I/O, no clock, no randomness. The prompt itself is Russian
//! because the product generates Russian-language résumés.

use crate::models::profile::UserProfile;

/// Fallback phrase for any unrecognized style tag. Unknown styles are never
/// an error: the builder is total over arbitrary string input.
const DEFAULT_FORMAT: &str = "профессиональный формат";

/// Rendered in place of absent fields and empty sections. Sections are always
/// present in the prompt; the model is told explicitly when data is missing.
pub const NOT_SPECIFIED: &str = "Не указано";

/// Resume prompt skeleton. Placeholders are filled by [`build_prompt`].
const RESUME_PROMPT_TEMPLATE: &str = r#"Выступи в роли профессионального HR-специалиста и создай привлекательное резюме на русском языке в {format_instruction}{position_clause}.

Используй следующие данные:

### ПЕРСОНАЛЬНАЯ ИНФОРМАЦИЯ
ФИО: {name}
Контакты: {contacts}

### ПРОФЕССИОНАЛЬНЫЙ ПРОФИЛЬ
{about}

### ОБРАЗОВАНИЕ
{education}

### ОПЫТ РАБОТЫ
{experience}

### ПРОФЕССИОНАЛЬНЫЕ НАВЫКИ
{skills}

### ДОСТИЖЕНИЯ И НАГРАДЫ
{achievements}

### ДОПОЛНИТЕЛЬНАЯ ИНФОРМАЦИЯ
{additional_info}

## ИНСТРУКЦИИ ПО ФОРМАТИРОВАНИЮ:
1. Используй профессиональный и лаконичный язык
2. Выдели ключевые навыки и достижения, релевантные {relevance_target}
3. Используй активные глаголы для описания опыта работы
4. Приоритизируй недавний опыт и наиболее значимые достижения
5. Включи количественные показатели достижений где возможно (%, цифры, метрики)
6. Адаптируй контент под {format_instruction}
7. Исключи любую неуместную или избыточную информацию

Верни результат в формате Markdown, с четким разделением секций."#;

/// Resolves a style tag to its formatting-instruction phrase.
pub fn style_instruction(style: &str) -> &'static str {
    match style {
        "standard" => "классический формат с четким структурированием разделов",
        "chronological" => "хронологический формат с опытом работы от последнего места к первому",
        "functional" => "функциональный формат с акцентом на навыки и компетенции",
        "targeted" => "целевой формат, адаптированный под конкретную вакансию",
        "creative" => "творческий формат с уникальным стилем, подчеркивающим индивидуальность",
        "academic" => "академический формат с акцентом на научные достижения и публикации",
        "it" => "формат для IT-специалиста с акцентом на технические навыки и проекты",
        "business" => "деловой формат с фокусом на достижения и бизнес-метрики",
        _ => DEFAULT_FORMAT,
    }
}

/// Rendering flags for one collection section.
///
/// Each flag appends a hint for the model; none of them transform the
/// underlying data. Inline hints land on individual bullets, trailer hints
/// close the whole list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Append a state-the-period hint to items that already mention dates
    /// (education, experience).
    pub period_hint: bool,
    /// Append a proficiency-level hint to every item (skills).
    pub proficiency_hint: bool,
    /// Append a quantify-the-result hint to every item (achievements).
    pub quantify_hint: bool,
    /// Trail the list with a highlight-achievements-per-position instruction
    /// (experience).
    pub highlight_achievements: bool,
    /// Trail the list with a group-by-category instruction (skills).
    pub categorize: bool,
}

/// Renders a collection as bulleted lines. Empty collections become the
/// placeholder line, never an empty string and never an omitted section.
pub fn format_list(items: &[String], options: ListOptions) -> String {
    if items.is_empty() {
        return NOT_SPECIFIED.to_string();
    }

    let mut lines: Vec<String> = Vec::with_capacity(items.len() + 2);
    for item in items {
        let mut line = format!("- {item}");
        if options.period_hint && mentions_period(item) {
            line.push_str(" (укажи период явно)");
        }
        if options.proficiency_hint {
            line.push_str(" (укажи уровень владения)");
        }
        if options.quantify_hint {
            line.push_str(" (приведи количественный показатель результата)");
        }
        lines.push(line);
    }

    if options.highlight_achievements {
        lines.push("(Выдели конкретные достижения на каждой позиции)".to_string());
    }
    if options.categorize {
        lines.push("(Сгруппируй навыки по категориям: технические, soft skills, языки)".to_string());
    }

    lines.join("\n")
}

/// True for items that already carry a year or period wording; those get the
/// explicit state-the-period hint.
fn mentions_period(item: &str) -> bool {
    if item.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    const PERIOD_WORDS: &[&str] = &["год", "лет", "настоящее время", "present", "гг."];
    let lower = item.to_lowercase();
    PERIOD_WORDS.iter().any(|w| lower.contains(w))
}

fn field_or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED
    } else {
        trimmed
    }
}

/// Builds the full instruction prompt for one profile and style selector.
pub fn build_prompt(profile: &UserProfile, style: &str) -> String {
    let format_instruction = style_instruction(style);

    let target_position = profile
        .target_position
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let position_clause = target_position
        .map(|p| format!(" для позиции {p}"))
        .unwrap_or_default();
    let relevance_target = target_position.unwrap_or("указанной области");

    RESUME_PROMPT_TEMPLATE
        .replace("{format_instruction}", format_instruction)
        .replace("{position_clause}", &position_clause)
        .replace("{relevance_target}", relevance_target)
        .replace("{name}", field_or_placeholder(&profile.name))
        .replace("{contacts}", field_or_placeholder(&profile.contacts))
        .replace("{about}", field_or_placeholder(&profile.about))
        .replace(
            "{education}",
            &format_list(
                &profile.education,
                ListOptions {
                    period_hint: true,
                    ..Default::default()
                },
            ),
        )
        .replace(
            "{experience}",
            &format_list(
                &profile.experience,
                ListOptions {
                    period_hint: true,
                    highlight_achievements: true,
                    ..Default::default()
                },
            ),
        )
        .replace(
            "{skills}",
            &format_list(
                &profile.skills,
                ListOptions {
                    proficiency_hint: true,
                    categorize: true,
                    ..Default::default()
                },
            ),
        )
        .replace(
            "{achievements}",
            &format_list(
                &profile.achievements,
                ListOptions {
                    quantify_hint: true,
                    ..Default::default()
                },
            ),
        )
        .replace(
            "{additional_info}",
            field_or_placeholder(&profile.additional_info),
        )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
