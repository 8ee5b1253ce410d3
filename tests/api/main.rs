mod health_check;
mod newsletters;
mod unsubscribe;
