//! Built-in dataset for first-run seeding.
//!
//! When the remote `categories` collection comes back empty, the engine
//! populates it from this fixed catalog (in dependency order: categories,
//! sections, items, then articles), assigning a monotonic `index` within
//! each sibling group so later ordered reads are stable.

use crate::catalog::{Article, Category, ItemType, PromptItem, Section, SubPrompt};
use crate::store::rows::{ArticleRow, CategoryRow, ItemRow, SectionRow};

/// Flat rows derived from the built-in catalog, ready for insertion.
#[derive(Debug, Default)]
pub struct SeedRows {
    /// Category rows, indexed 0..n in display order.
    pub categories: Vec<CategoryRow>,
    /// Section rows, indexed per category.
    pub sections: Vec<SectionRow>,
    /// Item rows, indexed per section (or category).
    pub items: Vec<ItemRow>,
    /// Article rows (the built-in catalog ships none).
    pub articles: Vec<ArticleRow>,
}

/// Derive insertable rows from the built-in catalog.
pub fn seed_rows() -> SeedRows {
    let mut rows = SeedRows::default();

    for (c_index, category) in default_catalog().iter().enumerate() {
        rows.categories
            .push(CategoryRow::from_model(category, c_index as i64));

        for (s_index, section) in category.sections.iter().enumerate() {
            rows.sections
                .push(SectionRow::from_model(&category.id, section, s_index as i64));

            for (i_index, item) in section.items.iter().enumerate() {
                rows.items
                    .push(ItemRow::in_section(&section.id, item, i_index as i64));
            }
        }

        for (i_index, item) in category.items.iter().enumerate() {
            rows.items
                .push(ItemRow::in_category(&category.id, item, i_index as i64));
        }
    }

    for article in default_articles() {
        rows.articles.push(ArticleRow::from_model(&article));
    }

    rows
}

/// The built-in category tree.
pub fn default_catalog() -> Vec<Category> {
    vec![
        Category {
            id: "analysis".into(),
            title: "Анализ ЦА".into(),
            description: "Найди скрытые смыслы".into(),
            sections: vec![
                Section {
                    id: "analysis-prompts".into(),
                    title: "Промты: Распаковка личности".into(),
                    description: Some(
                        "Базовые инструменты для глубокого анализа аудитории.".into(),
                    ),
                    instructions: Some(
                        "В этом разделе собраны промты, которые помогут вам сегментировать \
                         аудиторию. Используйте их последовательно: сначала общий анализ, \
                         затем детализация аватаров."
                            .into(),
                    ),
                    items: vec![
                        PromptItem {
                            id: "avatar-creation".into(),
                            title: "Создание аватара клиента".into(),
                            item_type: ItemType::Prompt,
                            description: "Генерирует детальный портрет идеального клиента на \
                                          основе базовых вводных."
                                .into(),
                            instructions: "Вставьте описание вашей ниши и продукта в квадратные \
                                           скобки. Не меняйте структуру запроса."
                                .into(),
                            content: "Действуй как опытный маркетолог с 10-летним стажем.\n\
                                      Твоя задача — создать детальный аватар клиента для ниши: \
                                      [ОПИСАНИЕ НИШИ] и продукта: [ОПИСАНИЕ ПРОДУКТА].\n\n\
                                      Опиши следующие пункты:\n\
                                      1. Социально-демографические характеристики.\n\
                                      2. Психографика (ценности, страхи, мечты).\n\
                                      3. Боли и потребности, которые закрывает продукт.\n\
                                      4. Возражения при покупке."
                                .into(),
                            ..Default::default()
                        },
                        PromptItem {
                            id: "pain-points".into(),
                            title: "Выявление скрытых болей".into(),
                            item_type: ItemType::Prompt,
                            description: "Помогает найти неочевидные проблемы аудитории для \
                                          использования в контенте."
                                .into(),
                            instructions: "Используйте этот промт после того, как определитесь \
                                           с базовым аватаром."
                                .into(),
                            content: "Проанализируй целевую аудиторию: [ОПИСАНИЕ АУДИТОРИИ].\n\
                                      Напиши список из 10 скрытых, неочевидных болей, в которых \
                                      эти люди могут не признаваться даже себе.\n\
                                      Для каждой боли предложи тему поста, который мягко \
                                      затронет эту проблему."
                                .into(),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                Section {
                    id: "analysis-assistants".into(),
                    title: "GPT-Ассистенты: Маркетолог".into(),
                    items: vec![PromptItem {
                        id: "assistant-strategist".into(),
                        title: "Ассистент: Главный Стратег".into(),
                        item_type: ItemType::Assistant,
                        description: "Настроенный бот, который помнит контекст вашего проекта \
                                      и критикует идеи."
                            .into(),
                        instructions: "Скопируйте текст ниже в поле \"Custom Instructions\" \
                                       вашего ChatGPT или создайте нового GPTs."
                            .into(),
                        content: "Role: Ты — Senior Marketing Strategist.\n\
                                  Tone: Профессиональный, критичный, ориентированный на данные.\n\
                                  Task: Твоя цель — подвергать сомнению гипотезы пользователя, \
                                  искать логические дыры в маркетинговых стратегиях и предлагать \
                                  улучшения на основе поведенческой психологии.\n\
                                  Никогда не хвали идею просто так. Всегда предлагай альтернативу."
                            .into(),
                        sub_prompts: vec![
                            SubPrompt {
                                title: "Критика оффера".into(),
                                content: "Прокритикуй мой текущий оффер: [ТЕКСТ ОФФЕРА]. \
                                          Найди 3 слабых места."
                                    .into(),
                            },
                            SubPrompt {
                                title: "Поиск конкурентов".into(),
                                content: "Какие неочевидные конкуренты могут быть у продукта \
                                          [ПРОДУКТ]?"
                                    .into(),
                            },
                        ],
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        },
        Category {
            id: "content-strategy".into(),
            title: "Контент-стратегия".into(),
            description: "Под разные типы контента".into(),
            sections: vec![Section {
                id: "plan-generation".into(),
                title: "Генерация контент-планов".into(),
                instructions: Some("Используйте эти промты для планирования на месяц вперед.".into()),
                items: vec![PromptItem {
                    id: "month-plan".into(),
                    title: "Контент-план на месяц".into(),
                    item_type: ItemType::Prompt,
                    description: "Создает сбалансированный план публикаций (продающие, \
                                  развлекательные, полезные)."
                        .into(),
                    instructions: "Укажите частоту постинга и основные цели месяца.".into(),
                    content: "Создай контент-план для Instagram на 30 дней.\n\
                              Ниша: [НИША].\n\
                              Цель месяца: [ЦЕЛЬ, НАПРИМЕР: ПРОДАЖА КУРСА].\n\
                              Частота: 1 пост в день + 3 сторис.\n\
                              Используй формулу 40% пользы, 30% личности, 30% продаж.\n\
                              Выдай результат в виде таблицы."
                        .into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        },
        Category {
            id: "style-voice".into(),
            title: "Твой стиль речи".into(),
            description: "Чтобы ChatGPT писал как ты".into(),
            sections: vec![Section {
                id: "tone-of-voice".into(),
                title: "Настройка Tone of Voice".into(),
                items: vec![PromptItem {
                    id: "analyze-style".into(),
                    title: "Анализ авторского стиля".into(),
                    item_type: ItemType::Prompt,
                    description: "Скармливаете GPT свои тексты, чтобы он научился вашему слогу."
                        .into(),
                    instructions: "Соберите 3-5 своих лучших текстов и вставьте их в промт.".into(),
                    content: "Я отправлю тебе несколько примеров моих текстов.\n\
                              Твоя задача — проанализировать мой стиль письма (tone of voice).\n\
                              Выдели особенности:\n\
                              1. Длина предложений.\n\
                              2. Использование сленга или терминологии.\n\
                              3. Эмоциональная окраска.\n\
                              4. Структура абзацев.\n\
                              После анализа составь инструкцию для себя, как писать в моем стиле.\n\
                              Вот тексты: [ВСТАВИТЬ ТЕКСТЫ]"
                        .into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        },
        Category {
            id: "engineering".into(),
            title: "Промт-инженеринг".into(),
            description: "Чтобы решать любую задачу".into(),
            sections: vec![Section {
                id: "advanced-techniques".into(),
                title: "Продвинутые техники".into(),
                items: vec![PromptItem {
                    id: "chain-of-thought".into(),
                    title: "Chain of Thought (Цепочка мыслей)".into(),
                    item_type: ItemType::Prompt,
                    description: "Заставляет модель рассуждать пошагово перед ответом.".into(),
                    instructions: "Добавляйте этот фрагмент к сложным логическим задачам.".into(),
                    content: "[ВАША ЗАДАЧА]\n\n\
                              Перед тем как дать окончательный ответ, рассуждай пошагово. Опиши \
                              ход своих мыслей, рассмотри разные варианты решения и выбери \
                              лучший. Начинай ответ с фразы \"Давай подумаем...\""
                        .into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        },
        Category {
            id: "posts".into(),
            title: "Посты".into(),
            description: "Для телеграм, инстаграм".into(),
            ..Default::default()
        },
        Category {
            id: "training".into(),
            title: "Обучение ChatGPT".into(),
            description: "Под свою личность".into(),
            ..Default::default()
        },
    ]
}

/// Built-in articles. The shipped catalog has none; articles are authored
/// through the admin CMS.
pub fn default_articles() -> Vec<Article> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tree::build_tree;

    #[test]
    fn test_seed_indexes_are_monotonic_per_sibling_group() {
        let rows = seed_rows();

        for (expected, row) in rows.categories.iter().enumerate() {
            assert_eq!(row.index, expected as i64);
        }

        // Items restart their index within each section.
        let in_first_section: Vec<_> = rows
            .items
            .iter()
            .filter(|r| r.section_id.as_deref() == Some("analysis-prompts"))
            .collect();
        assert_eq!(in_first_section[0].index, 0);
        assert_eq!(in_first_section[1].index, 1);
    }

    #[test]
    fn test_seed_rows_rebuild_into_the_same_tree() {
        let rows = seed_rows();
        let rebuilt = build_tree(rows.categories, rows.sections, rows.items);
        assert_eq!(rebuilt, default_catalog());
    }

    #[test]
    fn test_seed_has_all_six_categories() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 6);

        let ids: Vec<_> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "analysis",
                "content-strategy",
                "style-voice",
                "engineering",
                "posts",
                "training"
            ]
        );
    }
}
