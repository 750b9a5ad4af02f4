//! Command-line front end: list/show/add/edit/set/rm per entity kind,
//! speaking to the server exclusively through the client crate.

use anyhow::bail;
use clap::{Parser, Subcommand};

use opsboard_client::ApiClient;
use opsboard_core::EntityStore;
use opsboard_core::types::{
    CreatePersonInput, CreateProjectInput, CreateTaskInput, Person, PersonPatch, Project,
    ProjectPatch, Task, TaskPatch, TaskStatus, UpdatePersonInput, UpdateProjectInput,
    UpdateTaskInput,
};

#[derive(Debug, Parser)]
#[command(name = "opsboard", about = "Opsboard command-line client")]
pub struct Cli {
    /// Base URL of the Opsboard server.
    #[arg(long, default_value = "http://127.0.0.1:3000", global = true)]
    base_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage people
    #[command(subcommand)]
    People(PeopleCommand),
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Check server health
    Health,
}

#[derive(Debug, Subcommand)]
enum PeopleCommand {
    /// List all people
    List,
    /// Show one person
    Show { id: String },
    /// Create a person
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Replace a person (omitted optional fields are cleared)
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change only the given fields of a person
    Set {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a person
    Rm { id: String },
}

#[derive(Debug, Subcommand)]
enum ProjectsCommand {
    /// List all projects
    List,
    /// Show one project
    Show { id: String },
    /// Create a project
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        owner_id: Option<String>,
    },
    /// Replace a project (omitted optional fields are cleared)
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        owner_id: Option<String>,
    },
    /// Change only the given fields of a project
    Set {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        owner_id: Option<String>,
    },
    /// Delete a project
    Rm { id: String },
}

#[derive(Debug, Subcommand)]
enum TasksCommand {
    /// List all tasks
    List,
    /// Show one task
    Show { id: String },
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// todo | in_progress | done (defaults to todo)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        assignee_id: Option<String>,
    },
    /// Replace a task (omitted optional fields are cleared)
    Edit {
        id: String,
        #[arg(long)]
        title: String,
        /// todo | in_progress | done
        #[arg(long)]
        status: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        assignee_id: Option<String>,
    },
    /// Change only the given fields of a task
    Set {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// todo | in_progress | done
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        assignee_id: Option<String>,
    },
    /// Delete a task
    Rm { id: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = ApiClient::new(self.base_url.as_str())?;
        match self.command {
            Command::People(command) => run_people(&client, command).await,
            Command::Projects(command) => run_projects(&client, command).await,
            Command::Tasks(command) => run_tasks(&client, command).await,
            Command::Health => {
                let ok = client.health().await?;
                println!("server ok: {}", ok);
                Ok(())
            }
        }
    }
}

async fn run_people(client: &ApiClient, command: PeopleCommand) -> anyhow::Result<()> {
    match command {
        PeopleCommand::List => {
            let people: Vec<Person> = client.list().await?;
            for person in &people {
                print_person(person);
            }
            Ok(())
        }
        PeopleCommand::Show { id } => {
            let person: Option<Person> = client.get(&id).await?;
            match person {
                Some(person) => {
                    print_person_detail(&person);
                    Ok(())
                }
                None => bail!("person {} not found", id),
            }
        }
        PeopleCommand::Add { name, email } => {
            let person: Person = client.create(CreatePersonInput { name, email }).await?;
            print_person(&person);
            Ok(())
        }
        PeopleCommand::Edit { id, name, email } => {
            let person: Person = client
                .update(&id, UpdatePersonInput { name, email })
                .await?;
            print_person(&person);
            Ok(())
        }
        PeopleCommand::Set { id, name, email } => {
            let person: Person = client.patch(&id, PersonPatch { name, email }).await?;
            print_person(&person);
            Ok(())
        }
        PeopleCommand::Rm { id } => {
            opsboard_core::store::EntityStore::<Person>::delete(client, &id).await?;
            println!("deleted {}", id);
            Ok(())
        }
    }
}

async fn run_projects(client: &ApiClient, command: ProjectsCommand) -> anyhow::Result<()> {
    match command {
        ProjectsCommand::List => {
            let projects: Vec<Project> = client.list().await?;
            for project in &projects {
                print_project(project);
            }
            Ok(())
        }
        ProjectsCommand::Show { id } => {
            let project: Option<Project> = client.get(&id).await?;
            match project {
                Some(project) => {
                    print_project_detail(&project);
                    Ok(())
                }
                None => bail!("project {} not found", id),
            }
        }
        ProjectsCommand::Add {
            name,
            description,
            owner_id,
        } => {
            let project: Project = client
                .create(CreateProjectInput {
                    name,
                    description,
                    owner_id,
                })
                .await?;
            print_project(&project);
            Ok(())
        }
        ProjectsCommand::Edit {
            id,
            name,
            description,
            owner_id,
        } => {
            let project: Project = client
                .update(
                    &id,
                    UpdateProjectInput {
                        name,
                        description,
                        owner_id,
                    },
                )
                .await?;
            print_project(&project);
            Ok(())
        }
        ProjectsCommand::Set {
            id,
            name,
            description,
            owner_id,
        } => {
            let project: Project = client
                .patch(
                    &id,
                    ProjectPatch {
                        name,
                        description,
                        owner_id,
                    },
                )
                .await?;
            print_project(&project);
            Ok(())
        }
        ProjectsCommand::Rm { id } => {
            opsboard_core::store::EntityStore::<Project>::delete(client, &id).await?;
            println!("deleted {}", id);
            Ok(())
        }
    }
}

async fn run_tasks(client: &ApiClient, command: TasksCommand) -> anyhow::Result<()> {
    match command {
        TasksCommand::List => {
            let tasks: Vec<Task> = client.list().await?;
            for task in &tasks {
                print_task(task);
            }
            Ok(())
        }
        TasksCommand::Show { id } => {
            let task: Option<Task> = client.get(&id).await?;
            match task {
                Some(task) => {
                    print_task_detail(&task);
                    Ok(())
                }
                None => bail!("task {} not found", id),
            }
        }
        TasksCommand::Add {
            title,
            description,
            status,
            project_id,
            assignee_id,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let task: Task = client
                .create(CreateTaskInput {
                    title,
                    description,
                    status,
                    project_id,
                    assignee_id,
                })
                .await?;
            print_task(&task);
            Ok(())
        }
        TasksCommand::Edit {
            id,
            title,
            status,
            description,
            project_id,
            assignee_id,
        } => {
            let status = parse_status(&status)?;
            let task: Task = client
                .update(
                    &id,
                    UpdateTaskInput {
                        title,
                        description,
                        status,
                        project_id,
                        assignee_id,
                    },
                )
                .await?;
            print_task(&task);
            Ok(())
        }
        TasksCommand::Set {
            id,
            title,
            description,
            status,
            project_id,
            assignee_id,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let task: Task = client
                .patch(
                    &id,
                    TaskPatch {
                        title,
                        description,
                        status,
                        project_id,
                        assignee_id,
                    },
                )
                .await?;
            print_task(&task);
            Ok(())
        }
        TasksCommand::Rm { id } => {
            opsboard_core::store::EntityStore::<Task>::delete(client, &id).await?;
            println!("deleted {}", id);
            Ok(())
        }
    }
}

fn parse_status(raw: &str) -> anyhow::Result<TaskStatus> {
    raw.parse()
        .map_err(|message: String| anyhow::anyhow!(message))
}

fn print_person(person: &Person) {
    println!(
        "{}  {}  {}",
        person.id,
        person.name,
        person.email.as_deref().unwrap_or("-")
    );
}

fn print_person_detail(person: &Person) {
    println!("id:         {}", person.id);
    println!("name:       {}", person.name);
    println!("email:      {}", person.email.as_deref().unwrap_or("-"));
    println!("created at: {}", person.created_at.to_rfc3339());
    println!("updated at: {}", person.updated_at.to_rfc3339());
}

fn print_project(project: &Project) {
    println!(
        "{}  {}  owner={}",
        project.id,
        project.name,
        project.owner_id.as_deref().unwrap_or("-")
    );
}

fn print_project_detail(project: &Project) {
    println!("id:          {}", project.id);
    println!("name:        {}", project.name);
    println!(
        "description: {}",
        project.description.as_deref().unwrap_or("-")
    );
    println!("owner:       {}", project.owner_id.as_deref().unwrap_or("-"));
    println!("created at:  {}", project.created_at.to_rfc3339());
    println!("updated at:  {}", project.updated_at.to_rfc3339());
}

fn print_task(task: &Task) {
    println!(
        "{}  [{}]  {}  assignee={}",
        task.id,
        task.status,
        task.title,
        task.assignee_id.as_deref().unwrap_or("-")
    );
}

fn print_task_detail(task: &Task) {
    println!("id:          {}", task.id);
    println!("title:       {}", task.title);
    println!(
        "description: {}",
        task.description.as_deref().unwrap_or("-")
    );
    println!("status:      {}", task.status);
    println!("project:     {}", task.project_id.as_deref().unwrap_or("-"));
    println!(
        "assignee:    {}",
        task.assignee_id.as_deref().unwrap_or("-")
    );
    println!("created at:  {}", task.created_at.to_rfc3339());
    println!("updated at:  {}", task.updated_at.to_rfc3339());
}
