use std::sync::Arc;

pub trait GetDatabaseConnect {
    type Connect;
    fn get_connect(&self) -> &Self::Connect;
}

impl<T> GetDatabaseConnect for Arc<T>
where
    T: GetDatabaseConnect,
{
    type Connect = T::Connect;

    fn get_connect(&self) -> &Self::Connect { (**self).get_connect() }
}
