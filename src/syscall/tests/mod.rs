
mod fd_ops;
