pub mod goals;
pub mod users;

pub use goals::Entity as Goals;
pub use goals::Model as Goal;
pub use users::Entity as Users;
pub use users::Model as User;
