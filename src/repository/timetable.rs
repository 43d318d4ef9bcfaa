use diesel::prelude::*;

use crate::domain::timetable::{NewTimetable, Timetable};
use crate::domain::types::{Semester, TimetableId, TimetableName, UserId};
use crate::models::timetable::{NewTimetable as DbNewTimetable, Timetable as DbTimetable};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, TimetableReader, TimetableWriter,
};

impl TimetableReader for DieselRepository {
    fn get_timetable_by_id(&self, id: TimetableId) -> RepositoryResult<Option<Timetable>> {
        use crate::schema::timetables;

        let mut conn = self.conn()?;

        let timetable = timetables::table
            .filter(timetables::id.eq(id.get()))
            .first::<DbTimetable>(&mut conn)
            .optional()?;

        let timetable = timetable.map(TryInto::try_into).transpose()?;
        Ok(timetable)
    }

    fn list_timetables(&self, user_id: UserId) -> RepositoryResult<Vec<Timetable>> {
        use crate::schema::timetables;

        let mut conn = self.conn()?;

        let items = timetables::table
            .filter(timetables::user_id.eq(user_id.get()))
            .order(timetables::id.asc())
            .load::<DbTimetable>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Timetable>, _>>()?;

        Ok(items)
    }

    fn timetable_name_exists(
        &self,
        user_id: UserId,
        year: i32,
        semester: Semester,
        name: &TimetableName,
    ) -> RepositoryResult<bool> {
        use crate::schema::timetables;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            timetables::table
                .filter(timetables::user_id.eq(user_id.get()))
                .filter(timetables::year.eq(year))
                .filter(timetables::semester.eq(semester.as_str()))
                .filter(timetables::name.eq(name.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl TimetableWriter for DieselRepository {
    fn create_timetable(&self, timetable: &NewTimetable) -> RepositoryResult<Timetable> {
        use crate::schema::timetables;

        let mut conn = self.conn()?;
        let db_timetable: DbNewTimetable = timetable.clone().into();

        let stored = diesel::insert_into(timetables::table)
            .values(db_timetable)
            .get_result::<DbTimetable>(&mut conn)?;

        Ok(Timetable::try_from(stored)?)
    }

    fn rename_timetable(
        &self,
        id: TimetableId,
        name: &TimetableName,
    ) -> RepositoryResult<Timetable> {
        use crate::schema::timetables;

        let mut conn = self.conn()?;

        let stored = diesel::update(timetables::table.filter(timetables::id.eq(id.get())))
            .set((
                timetables::name.eq(name.as_str()),
                timetables::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<DbTimetable>(&mut conn)?;

        Ok(Timetable::try_from(stored)?)
    }

    fn delete_timetable(&self, id: TimetableId) -> RepositoryResult<usize> {
        use crate::schema::{enrolls, timetables};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(enrolls::table.filter(enrolls::timetable_id.eq(id.get())))
                .execute(conn)?;

            Ok(diesel::delete(timetables::table.filter(timetables::id.eq(id.get())))
                .execute(conn)?)
        })?;

        Ok(affected)
    }
}
