//! Subject catalogue lookups.

use crate::{
    entities::{Subject, subject},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Subjects taught in `grade` for `country`, in catalogue order.
pub async fn get_subjects_by_grade(
    db: &DatabaseConnection,
    grade: i32,
    country: &str,
) -> Result<Vec<subject::Model>> {
    Subject::find()
        .filter(subject::Column::Grade.eq(grade))
        .filter(subject::Column::Country.eq(country))
        .order_by_asc(subject::Column::DisplayOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::Set;

    #[tokio::test]
    async fn test_get_subjects_by_grade() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_subject(&db, "g10-science", 10).await?;
        create_test_subject(&db, "g10-maths", 10).await?;
        create_test_subject(&db, "g11-maths", 11).await?;

        // Put maths first in the catalogue
        let maths = Subject::find_by_id("g10-maths".to_string())
            .one(&db)
            .await?
            .ok_or_else(|| crate::errors::Error::not_found("subject", "g10-maths"))?;
        let mut active: subject::ActiveModel = maths.into();
        active.display_order = Set(-1);
        active.update(&db).await?;

        let subjects = get_subjects_by_grade(&db, 10, "LK").await?;
        let ids: Vec<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["g10-maths", "g10-science"]);

        assert!(get_subjects_by_grade(&db, 10, "IN").await?.is_empty());
        Ok(())
    }
}
