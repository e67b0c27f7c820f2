//! 精选文章列表
//!
//! 按分类维护的静态文章清单，标题带俄文译名。

/// 一条精选文章
#[derive(Debug, Clone, Copy)]
pub struct Article {
    pub title: &'static str,
    pub url: &'static str,
    pub title_ru: &'static str,
}

const PROGRAMMING: [Article; 6] = [
    Article {
        title: "JavaScript Tutorial",
        url: "https://www.w3schools.com/js/",
        title_ru: "Учебник JavaScript",
    },
    Article {
        title: "Python Tutorial",
        url: "https://www.w3schools.com/python/",
        title_ru: "Учебник Python",
    },
    Article {
        title: "HTML Tutorial",
        url: "https://www.w3schools.com/html/",
        title_ru: "Учебник HTML",
    },
    Article {
        title: "CSS Tutorial",
        url: "https://www.w3schools.com/css/",
        title_ru: "Учебник CSS",
    },
    Article {
        title: "React Docs",
        url: "https://react.dev/",
        title_ru: "Документация React",
    },
    Article {
        title: "Node.js Docs",
        url: "https://nodejs.org/en/docs/",
        title_ru: "Документация Node.js",
    },
];

const HISTORY: [Article; 6] = [
    Article {
        title: "Ancient Rome",
        url: "https://en.wikipedia.org/wiki/Ancient_Rome",
        title_ru: "Древний Рим",
    },
    Article {
        title: "Middle Ages",
        url: "https://en.wikipedia.org/wiki/Middle_Ages",
        title_ru: "Средние века",
    },
    Article {
        title: "Renaissance",
        url: "https://en.wikipedia.org/wiki/Renaissance",
        title_ru: "Ренессанс",
    },
    Article {
        title: "French Revolution",
        url: "https://en.wikipedia.org/wiki/French_Revolution",
        title_ru: "Французская революция",
    },
    Article {
        title: "World War I",
        url: "https://en.wikipedia.org/wiki/World_War_I",
        title_ru: "Первая мировая война",
    },
    Article {
        title: "World War II",
        url: "https://en.wikipedia.org/wiki/World_War_II",
        title_ru: "Вторая мировая война",
    },
];

const GAMES: [Article; 3] = [
    Article {
        title: "Video game",
        url: "https://en.wikipedia.org/wiki/Video_game",
        title_ru: "Видеоигра",
    },
    Article {
        title: "Game design",
        url: "https://en.wikipedia.org/wiki/Game_design",
        title_ru: "Дизайн игры",
    },
    Article {
        title: "Game Programming Patterns",
        url: "https://gameprogrammingpatterns.com/",
        title_ru: "Паттерны программирования игр",
    },
];

const CINEMA: [Article; 3] = [
    Article {
        title: "History of film",
        url: "https://en.wikipedia.org/wiki/History_of_film",
        title_ru: "История кинематографа",
    },
    Article {
        title: "Cinematography",
        url: "https://en.wikipedia.org/wiki/Cinematography",
        title_ru: "Кинематография",
    },
    Article {
        title: "Film directing",
        url: "https://en.wikipedia.org/wiki/Film_directing",
        title_ru: "Режиссура фильма",
    },
];

/// 按分类取文章列表；未知分类返回空列表
pub fn articles_for(category: &str) -> &'static [Article] {
    match category {
        "programming" => &PROGRAMMING,
        "history" => &HISTORY,
        "games" => &GAMES,
        "cinema" => &CINEMA,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        assert_eq!(articles_for("programming").len(), 6);
        assert_eq!(articles_for("history").len(), 6);
        assert_eq!(articles_for("games").len(), 3);
        assert_eq!(articles_for("cinema").len(), 3);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(articles_for("cooking").is_empty());
    }
}
