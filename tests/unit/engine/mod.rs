mod events;
mod routing;
