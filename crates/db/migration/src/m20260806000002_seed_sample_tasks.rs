use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SAMPLE_TASKS: [(&str, &str); 3] = [
    (
        "Set up the development environment",
        "Install the toolchain and run the server locally",
    ),
    (
        "Walk through the API",
        "List, create, update and delete a task over HTTP",
    ),
    (
        "Try the command line client",
        "Add a task and toggle it from the REPL",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (title, description) in SAMPLE_TASKS {
            let insert = Query::insert()
                .into_table(Tasks::Table)
                .columns([Tasks::Title, Tasks::Description, Tasks::Completed])
                .values_panic([title.into(), description.into(), false.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (title, _) in SAMPLE_TASKS {
            let delete = Query::delete()
                .from_table(Tasks::Table)
                .and_where(Expr::col(Tasks::Title).eq(title))
                .to_owned();
            manager.exec_stmt(delete).await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Tasks {
    Table,
    Title,
    Description,
    Completed,
}
