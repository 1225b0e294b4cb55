use super::state::AchievementCondition;

/// Static definition of one shipped achievement.
///
/// Adding an achievement: add an entry to `builtin_catalog()`. The `id` is
/// the persistence key for its unlock state, so never reuse or renumber one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: AchievementCondition,
}

/// The ten achievements shipped with the app, in display order.
pub fn builtin_catalog() -> &'static [AchievementDef] {
    use AchievementCondition::{ProjectCount, TotalRows};

    static CATALOG: [AchievementDef; 10] = [
        AchievementDef {
            id: "1",
            title: "編み物デビュー",
            description: "初めてのプロジェクトを作成",
            icon: "🎉",
            condition: ProjectCount { threshold: 1 },
        },
        AchievementDef {
            id: "2",
            title: "10段達成",
            description: "累計10段を編む",
            icon: "🌱",
            condition: TotalRows { threshold: 10 },
        },
        AchievementDef {
            id: "3",
            title: "50段達成",
            description: "累計50段を編む",
            icon: "🌿",
            condition: TotalRows { threshold: 50 },
        },
        AchievementDef {
            id: "4",
            title: "100段達成",
            description: "累計100段を編む",
            icon: "🎋",
            condition: TotalRows { threshold: 100 },
        },
        AchievementDef {
            id: "5",
            title: "500段達成",
            description: "累計500段を編む",
            icon: "🌳",
            condition: TotalRows { threshold: 500 },
        },
        AchievementDef {
            id: "6",
            title: "1000段達成",
            description: "累計1000段を編む！すごい！",
            icon: "🏆",
            condition: TotalRows { threshold: 1000 },
        },
        AchievementDef {
            id: "7",
            title: "3プロジェクト完成",
            description: "3つのプロジェクトを完成させる",
            icon: "⭐",
            condition: ProjectCount { threshold: 3 },
        },
        AchievementDef {
            id: "8",
            title: "5プロジェクト完成",
            description: "5つのプロジェクトを完成させる",
            icon: "✨",
            condition: ProjectCount { threshold: 5 },
        },
        AchievementDef {
            id: "9",
            title: "10プロジェクト完成",
            description: "10個のプロジェクトを完成！",
            icon: "🎊",
            condition: ProjectCount { threshold: 10 },
        },
        AchievementDef {
            id: "10",
            title: "編み物マスター",
            description: "累計2000段を編む伝説の編み手",
            icon: "👑",
            condition: TotalRows { threshold: 2000 },
        },
    ];

    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_ten_unique_ids() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 10);
        let ids: HashSet<_> = catalog.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn thresholds_are_positive() {
        assert!(builtin_catalog()
            .iter()
            .all(|d| d.condition.threshold() > 0));
    }
}
